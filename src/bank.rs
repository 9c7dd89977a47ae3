//! A bank of history registers selected by a key.

use std::collections::HashMap;
use itertools::Itertools;
use crate::bits::*;
use crate::error::*;
use crate::history::HistoryRegister;

/// A set of [`HistoryRegister`], one per distinct key.
///
/// Registers are created lazily (all zeros) the first time a key is read.
/// The bank hands out copies; callers commit changes with
/// [`RegisterBank::write`].
#[derive(Clone, Debug)]
pub struct RegisterBank {
    name: String,

    /// Width of the keys used to select a register
    key_width: usize,

    /// Width of each register
    register_width: usize,

    data: HashMap<BitVector, HistoryRegister>,
}
impl RegisterBank {
    pub fn new(name: impl ToString, key_width: usize, register_width: usize)
        -> Self
    {
        Self {
            name: name.to_string(),
            key_width,
            register_width,
            data: HashMap::new(),
        }
    }

    pub fn key_width(&self) -> usize { self.key_width }
    pub fn register_width(&self) -> usize { self.register_width }

    /// Number of registers materialized so far.
    pub fn len(&self) -> usize { self.data.len() }
    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    /// Return a copy of the register selected by `key`, creating it first
    /// if this key has never been seen.
    pub fn read(&mut self, key: &Bits) -> Result<HistoryRegister> {
        check_width("register bank key", self.key_width, key.len())?;
        Ok(self.entry(key).clone())
    }

    /// Overwrite the register selected by `key`.
    pub fn write(&mut self, key: &Bits, value: &Bits) -> Result<()> {
        check_width("register bank key", self.key_width, key.len())?;
        check_width("register bank value", self.register_width, value.len())?;
        self.entry(key).load(value)
    }

    fn entry(&mut self, key: &Bits) -> &mut HistoryRegister {
        let name = &self.name;
        let width = self.register_width;
        self.data.entry(key.to_bitvec()).or_insert_with(|| {
            HistoryRegister::new(format!("{}[{}]", name, to_string(key)), width)
        })
    }

    /// Return the content of the register selected by `key` without
    /// creating it.
    pub fn peek(&self, key: &Bits) -> Option<&Bits> {
        self.data.get(key).map(|r| r.read())
    }

    /// A description of every register in the bank, ordered by key.
    pub fn monitor(&self) -> String {
        let lines = self.data.iter()
            .sorted_by(|x, y| x.0.cmp(y.0))
            .map(|(_, reg)| format!("  {}", reg.monitor()))
            .join("");
        format!("{} ({} registers):\n{}", self.name, self.data.len(), lines)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn read_creates_zeroed_register() {
        let mut bank = RegisterBank::new("PABHR", 3, 4);
        let key = parse("101").unwrap();
        assert!(bank.peek(&key).is_none());

        let reg = bank.read(&key).unwrap();
        assert_eq!(reg.to_string(), "0000");
        assert_eq!(reg.name(), "PABHR[101]");
        assert_eq!(bank.len(), 1);
    }

    #[test]
    fn write_is_per_key() {
        let mut bank = RegisterBank::new("PSBHR", 2, 3);
        let a = parse("00").unwrap();
        let b = parse("11").unwrap();

        let mut reg = bank.read(&a).unwrap();
        reg.insert(true);
        bank.write(&a, reg.read()).unwrap();

        assert_eq!(bank.read(&a).unwrap().to_string(), "001");
        assert_eq!(bank.read(&b).unwrap().to_string(), "000");
    }

    #[test]
    fn rejects_bad_widths() {
        let mut bank = RegisterBank::new("PABHR", 3, 4);
        assert!(bank.read(&parse("10").unwrap()).is_err());
        assert!(bank.write(&parse("100").unwrap(), &parse("1").unwrap()).is_err());
        assert!(bank.is_empty());
    }
}
