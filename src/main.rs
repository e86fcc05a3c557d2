use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::path::Path;

// Use library instead of local modules
use receipt_processor::{PointsEngine, Receipt, ReceiptError};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match (args.get(1).map(String::as_str), args.get(2)) {
        (Some("score"), Some(path)) => run_score(Path::new(path)),
        (Some("validate"), Some(path)) => run_validate(Path::new(path)),
        _ => {
            eprintln!("Usage:");
            eprintln!("   receipt-processor score <receipt.json>     Print points, rule by rule");
            eprintln!("   receipt-processor validate <receipt.json>  Check a receipt without scoring");
            eprintln!();
            eprintln!("   Run the HTTP API with: cargo run --bin receipt-server");
            std::process::exit(2);
        }
    }
}

fn load_receipt(path: &Path) -> Result<Receipt> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read receipt file: {:?}", path))?;

    match Receipt::from_json(&json) {
        Ok(receipt) => Ok(receipt),
        Err(ReceiptError::Validation(errors)) => {
            eprintln!("❌ Invalid receipt: {:?}", path);
            for error in &errors {
                eprintln!("   {}", error);
            }
            bail!("{} validation error(s)", errors.len());
        }
        Err(e) => Err(e.into()),
    }
}

fn run_score(path: &Path) -> Result<()> {
    let receipt = load_receipt(path)?;
    let breakdown = PointsEngine::new().breakdown(&receipt);

    println!("🧾 {} ({} {})", receipt.retailer(), receipt.purchase_date(), receipt.purchase_time().format("%H:%M"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for (rule, points) in breakdown.rules() {
        println!("   {:<24} {:>6}", rule, points);
    }
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   {:<24} {:>6}", "total", breakdown.total());

    Ok(())
}

fn run_validate(path: &Path) -> Result<()> {
    let receipt = load_receipt(path)?;

    println!(
        "✓ Valid receipt: {} item(s), total {}",
        receipt.items().len(),
        receipt.total()
    );

    Ok(())
}
