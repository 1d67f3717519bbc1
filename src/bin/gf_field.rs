//! `gf-field` builds GF(p^n) from a primitive companion matrix and prints
//! its elements.
//!
//! **Usage:**
//! ```text
//! gf-field <SIZE> [--finder <enumeration|exhaustive>] [--view <matrix|vector>]
//!          [--projection <first-column|last-column>] [--limit <N>] [--all]
//! ```
//!
//! `SIZE` is the field order, either as `q` (`9`) or as `p^n` (`3^2`).

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gfmatrix::utils::{is_prime, prime_power_decomposition};
use gfmatrix::{
    ElementView, ExhaustiveFinder, FieldElements, FiniteFieldBuilder, PolynomialEnumerationFinder,
    PrimitiveFinder, VectorProjection,
};

/// How the primitive element is found.
#[derive(Copy, Clone, Debug, ValueEnum)]
enum Strategy {
    /// Companion matrices of primitive polynomials.
    Enumeration,
    /// Every recurrence seed in turn (prime degrees only).
    Exhaustive,
}

/// Build a finite field from a primitive companion matrix.
#[derive(Parser)]
#[command(name = "gf-field", version, about)]
struct Args {
    /// Field order, as `q` or `p^n`.
    #[arg(value_parser = parse_field_size)]
    size: (u64, u32),

    /// Primitive element search strategy.
    #[arg(long, value_enum, default_value_t = Strategy::Enumeration)]
    finder: Strategy,

    /// Print elements as matrices or as coordinate vectors.
    #[arg(long, value_enum, default_value_t = ElementView::Vector)]
    view: ElementView,

    /// Column used for the vector view.
    #[arg(long, value_enum, default_value_t = VectorProjection::FirstColumn)]
    projection: VectorProjection,

    /// Number of field elements to print.
    #[arg(long, default_value_t = 16)]
    limit: usize,

    /// Also list every primitive element the finder can produce.
    #[arg(long)]
    all: bool,
}

fn parse_field_size(s: &str) -> Result<(u64, u32), String> {
    if let Some((p, n)) = s.split_once('^') {
        let p: u64 = p.trim().parse().map_err(|e| format!("characteristic: {e}"))?;
        let n: u32 = n.trim().parse().map_err(|e| format!("degree: {e}"))?;
        if !is_prime(p) {
            return Err(format!("{p} is not prime"));
        }
        return Ok((p, n));
    }
    let q: u64 = s.trim().parse().map_err(|e| format!("field order: {e}"))?;
    prime_power_decomposition(q).ok_or_else(|| format!("{q} is not a prime power"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    let (p, n) = args.size;

    let mut finder: Box<dyn PrimitiveFinder> = match args.finder {
        Strategy::Enumeration => Box::new(PolynomialEnumerationFinder::new(p, n)?),
        Strategy::Exhaustive => Box::new(ExhaustiveFinder::new(p, n)?),
    };
    let params = finder.params();

    let primitive = finder
        .find_first()
        .with_context(|| format!("no primitive element for {params}"))?;
    println!("Primitive element of {params}:");
    println!("{primitive}");
    println!();

    if args.all {
        let all = finder.find_all()?;
        println!("{} primitive elements:", all.len());
        for (i, m) in all.iter().enumerate() {
            println!("#{}", i + 1);
            println!("{m}");
        }
        println!();
    }

    let mut builder = FiniteFieldBuilder::new(p, n, primitive)?.with_projection(args.projection);
    let mut last_decile = None;
    let mut report = |percent: u8| {
        let decile = percent / 10;
        if last_decile != Some(decile) {
            last_decile = Some(decile);
            info!(percent, "building field");
        }
    };
    let elements = builder
        .get_elements(args.view, Some(&mut report))
        .with_context(|| format!("building {params}"))?;

    let total = elements.len();
    println!("Non-zero elements of {params} ({total}):");
    match &elements {
        FieldElements::Matrices(matrices) => {
            for (i, m) in matrices.iter().take(args.limit).enumerate() {
                println!("A^{} =", i + 1);
                println!("{m}");
            }
        }
        FieldElements::Vectors(vectors) => {
            for (i, v) in vectors.iter().take(args.limit).enumerate() {
                println!("A^{} = {v:?}", i + 1);
            }
        }
    }
    if total > args.limit {
        println!("... {} more", total - args.limit);
    }
    Ok(())
}
