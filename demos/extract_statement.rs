use extrato_rs::{ExtractionConfig, ExtractorBuilder};
use std::env;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=extrato_rs=trace mostra o motivo de cada linha descartada
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let file_path = if args.len() > 1 {
        &args[1]
    } else {
        eprintln!("Using example statement from demos/sample_statement.txt\n");
        "demos/sample_statement.txt"
    };

    let config = ExtractionConfig {
        reference_year: Some(2024),
        ..Default::default()
    };

    let extractor = ExtractorBuilder::new()
        .config(config)
        .categories(["Alimentação", "Transporte", "Saúde", "Casa", "Lazer", "Outros"])
        .account_holder("Maria Silva")
        .build()?;

    let content = std::fs::read_to_string(file_path)?;
    let report = extractor.extract_with_report(&content);

    println!("Found {} transactions\n", report.transactions.len());

    for (i, tx) in report.transactions.iter().enumerate() {
        println!("Transaction {}:", i + 1);
        println!("  Date: {}", tx.date);
        println!("  Description: {}", tx.description);
        println!("  Amount: R$ {:.2}", tx.amount);
        println!("  Type: {:?}", tx.kind);
        println!("  Category: {}", tx.category);
        println!("  Payment: {:?}", tx.payment_method);
        println!("  Confidence: {:.2}", tx.confidence);
        if tx.is_subscription {
            println!("  Subscription");
        }
        println!();
    }

    println!("{}", serde_json::to_string_pretty(&report.stats)?);

    Ok(())
}
