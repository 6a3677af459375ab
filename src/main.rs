use anyhow::Result;
use clap::Parser;
use cli::Cli;
use nw_segments::{NoVis, NW};

mod cli;
mod table;

fn main() -> Result<()> {
    let args = Cli::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = args.scoring.scoring_config()?;
    let (alphabet, matrix) = config.build()?;
    let (reference, query) = args.sequences()?;
    let aligner = NW::new(&alphabet, matrix)?;

    let mut grid_table = args.table.then(|| table::Table::new(&reference, &query));
    let aln = match &mut grid_table {
        Some(t) => aligner.align_with_visualizer(&reference, &query, t),
        None => aligner.align_with_visualizer(&reference, &query, &mut NoVis),
    };
    if let Some(t) = &grid_table {
        print!("{}", t.out);
    }
    let aln = aln?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&aln)?);
        return Ok(());
    }

    println!("Score: {}", aln.score());
    println!("CIGAR: {}", aln.cigar());
    println!();
    let [r, m, q] = table::render(&reference, &query, &aln);
    println!("{r}\n{m}\n{q}");
    println!();
    println!("reference\tquery\tscore\top");
    for s in &aln {
        println!(
            "{}..{}\t{}..{}\t{}\t{:?}",
            s.reference.start, s.reference.end, s.query.start, s.query.end, s.score, s.op
        );
    }
    Ok(())
}
