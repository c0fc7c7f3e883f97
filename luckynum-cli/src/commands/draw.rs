use super::{generate, source};
use crate::render::print_result;
use clap::Args;
use luckynum_core::{
    DigitPool, DrawMode, Drawer, EnteredNumbers, GeneratorConfig, LuckyError, Result,
};

#[derive(Args)]
pub struct PoolArgs {
    /// Numbers to take digits from
    #[arg(required = true)]
    numbers: Vec<String>,
}

#[derive(Args)]
pub struct DrawArgs {
    /// Numbers to take digits from
    #[arg(required = true)]
    numbers: Vec<String>,

    /// Draw mode (batch, sequential); defaults to batch
    #[arg(short, long)]
    mode: Option<DrawMode>,

    /// Seed for a reproducible draw
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub struct RevealArgs {
    /// Numbers to take digits from
    #[arg(required = true)]
    numbers: Vec<String>,

    /// Seed for a reproducible draw
    #[arg(short, long)]
    seed: Option<u64>,

    /// Ring the terminal bell on each reveal
    #[arg(long)]
    sound: bool,
}

/// Collect command-line numbers, refusing duplicates like the interactive
/// session does.
fn entries(numbers: &[String]) -> Result<EnteredNumbers> {
    let mut entries = EnteredNumbers::new();
    for number in numbers {
        entries.add(number)?;
    }
    Ok(entries)
}

pub fn handle_pool(args: PoolArgs, config: &GeneratorConfig) -> Result<()> {
    let pool = entries(&args.numbers)?.digit_pool();
    println!("{}", pool);

    let config = &config.draw;
    let values = pool.valid_values(config.min, config.max);
    println!(
        "Reachable numbers in {}..={}: {}",
        config.min,
        config.max,
        values.len()
    );
    if !values.is_empty() {
        let list = values
            .iter()
            .map(|v| format!("{:02}", v))
            .collect::<Vec<_>>()
            .join(" ");
        println!("  {}", list);
    }
    if values.len() < config.count {
        let shortfall = LuckyError::InsufficientCombinations {
            drawn: 0,
            needed: config.count,
            attempts: 0,
        };
        println!("{}", shortfall);
    }

    Ok(())
}

pub fn handle_draw(args: DrawArgs, config: &GeneratorConfig) -> Result<()> {
    let pool = entries(&args.numbers)?.digit_pool();
    let mode = args.mode.unwrap_or(DrawMode::Batch);
    let drawer = Drawer::new(config.draw)?;
    let result = drawer.draw(mode, &pool, source(args.seed))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", pool);
        print_result(&result);
    }

    Ok(())
}

pub async fn handle_reveal(args: RevealArgs, config: &GeneratorConfig) -> Result<()> {
    let pool: DigitPool = entries(&args.numbers)?.digit_pool();
    println!("{}", pool);
    generate(DrawMode::Sequential, &pool, config, args.seed, args.sound).await?;
    Ok(())
}
