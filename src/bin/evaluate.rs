use clap::Parser;
use std::path::PathBuf;
use twolevel::*;
use twolevel::sim::evaluate;

#[derive(Parser)]
#[command(version, about = "Evaluate a two-level adaptive branch predictor", long_about = None)]
struct Cli {
    /// Path to a text trace ("<hex pc> <T|N>" per line)
    trace: Option<PathBuf>,

    /// TOML predictor configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Predictor organization (GAg, GAs, PAg, PAp, SAg, SAp, SAs)
    #[arg(long)]
    kind: Option<PredictorKind>,

    /// Width of each branch history register
    #[arg(long)]
    bhr_size: Option<usize>,

    /// Width of each saturating counter
    #[arg(long)]
    sc_size: Option<usize>,

    /// Number of low program counter bits used as the branch address
    #[arg(long)]
    address_bits: Option<usize>,

    /// Width of the address hash selecting a set
    #[arg(long)]
    k_size: Option<usize>,

    /// Generate a synthetic trace with this many records instead of
    /// reading one
    #[arg(long, conflicts_with = "trace")]
    synthetic: Option<usize>,

    /// Number of distinct branches in a synthetic trace
    #[arg(long, default_value = "16")]
    branches: usize,

    /// Seed for the synthetic trace
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Print the predictor state after the run
    #[arg(long)]
    monitor: bool,
}

impl Cli {
    fn predictor_config(&self) -> anyhow::Result<PredictorConfig> {
        let mut cfg = match &self.config {
            Some(path) => PredictorConfig::from_toml(&std::fs::read_to_string(path)?)?,
            None => PredictorConfig::default(),
        };
        if let Some(kind) = self.kind { cfg.kind = kind; }
        if let Some(n) = self.bhr_size { cfg.bhr_size = n; }
        if let Some(n) = self.sc_size { cfg.sc_size = n; }
        if let Some(n) = self.address_bits { cfg.branch_instruction_size = n; }
        if let Some(n) = self.k_size { cfg.k_size = n; }
        Ok(cfg)
    }

    fn trace(&self, addr_bits: usize) -> anyhow::Result<Trace> {
        match (&self.trace, self.synthetic) {
            (Some(path), _) => {
                let text = std::fs::read_to_string(path)?;
                Ok(Trace::parse(path.display(), &text)?)
            },
            (None, Some(len)) => {
                Ok(Trace::synthetic(self.seed, self.branches, len, addr_bits)?)
            },
            (None, None) => {
                anyhow::bail!("expected a trace file or --synthetic <COUNT>")
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let cfg = args.predictor_config()?;
    let trace = args.trace(cfg.branch_instruction_size)?;
    println!("[*] Loaded {} records from {}", trace.num_entries(), trace.name());

    let mut p = cfg.build()?;
    println!("[*] {} bhr={} sc={} address={} k={} hash={:?}",
        p.name(), cfg.bhr_size, cfg.sc_size,
        cfg.branch_instruction_size, cfg.k_size, cfg.hash_mode
    );

    let stats = evaluate(p.as_mut(), &trace, cfg.branch_instruction_size)?;
    println!("[*] {:20} Global hit rate: {}/{} ({:.2}% correct) ({} misses)",
        p.name(),
        stats.global_hits(),
        stats.global_brns(),
        stats.hit_rate() * 100.0,
        stats.global_miss()
    );
    println!("[*] {} unique branches ({} always taken, {} never taken)",
        stats.num_unique_branches(),
        stats.num_always_taken(),
        stats.num_never_taken()
    );

    let low = stats.get_low_rate_branches(10, 16, 0.55);
    if !low.is_empty() {
        println!("[*] Low hit-rate branches:");
        for (pc, data) in low {
            println!("    {:016x}: {:>6}/{:<6} ({:.2}%) entropy={:.3}",
                pc, data.hits, data.occ, data.hit_rate() * 100.0,
                data.shannon_entropy()
            );
        }
    }

    if args.monitor {
        print!("{}", p.monitor());
    }
    Ok(())
}
