//! Screenshot Scan Example
//!
//! Classifies one image, or every image in a directory, as a screenshot or a
//! photograph and prints the heuristics that fired.
//!
//! Run with: cargo run --example scan -- <image_or_dir> [threshold]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use screenshot_scanner::{
    DEFAULT_THRESHOLD, ScanConfig, ScreenshotScanner, error::Result, report::JsonReport,
};

const EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "webp", "bmp"];

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Screenshot Scanner - Scan Example");
        println!("=================================");
        println!();
        println!("Usage: {} <image_or_dir> [threshold]", args[0]);
        println!();
        println!("Arguments:");
        println!("  image_or_dir - Image to classify, or a directory to batch over");
        println!("  threshold    - Minimum score, 0..=13 (default: {})", DEFAULT_THRESHOLD);
        println!();
        println!("Set RUST_LOG=debug to see every metric as it is computed.");
        return Ok(());
    }

    let target = Path::new(&args[1]);
    let threshold = match args.get(2).map(|s| s.parse::<u8>()) {
        Some(Ok(t)) => t,
        Some(Err(_)) => {
            eprintln!("Error: threshold must be a number between 0 and 13");
            std::process::exit(1);
        }
        None => DEFAULT_THRESHOLD,
    };

    let scanner = ScreenshotScanner::with_config(ScanConfig {
        threshold,
        verbose: true,
        ..ScanConfig::default()
    })?;

    if target.is_dir() {
        return scan_directory(&scanner, target);
    }

    // ═══════════════════════════════════════════════════════════════════
    // 1. SINGLE IMAGE
    // ═══════════════════════════════════════════════════════════════════
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("1️⃣  SINGLE IMAGE");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();

    let result = scanner.evaluate(target)?;

    println!("  Image:         {}", target.display());
    println!("  Is screenshot: {}", result.is_screenshot);
    println!("  Score:         {}/13", result.score);
    println!("  Confidence:    {:.1}%", result.confidence);
    println!();
    println!("  Reasons:");
    for reason in &result.reasons {
        println!("    - {}", reason);
    }
    println!();

    // ═══════════════════════════════════════════════════════════════════
    // 2. DETAILED METRICS
    // ═══════════════════════════════════════════════════════════════════
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("2️⃣  DETAILED METRICS");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();

    if let Some(metrics) = &result.metrics {
        for metric in metrics.iter() {
            let mark = if metric.vote { "✓" } else { " " };
            println!("  {} {:<18} {}", mark, metric.name, metric.value);
        }
    }
    println!();

    // ═══════════════════════════════════════════════════════════════════
    // 3. STRICT VS LENIENT
    // ═══════════════════════════════════════════════════════════════════
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("3️⃣  STRICT VS LENIENT THRESHOLDS");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();

    let strict = ScreenshotScanner::with_threshold(7)?.process(target)?;
    let lenient = ScreenshotScanner::with_threshold(3)?.process(target)?;
    println!("  Strict  (threshold 7): {}", strict.is_screenshot);
    println!("  Lenient (threshold 3): {}", lenient.is_screenshot);
    println!();

    // ═══════════════════════════════════════════════════════════════════
    // 4. JSON
    // ═══════════════════════════════════════════════════════════════════
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("4️⃣  JSON REPORT");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();

    match JsonReport::from(&result).to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("  ✗ Could not render JSON: {}", e),
    }

    Ok(())
}

fn scan_directory(scanner: &ScreenshotScanner, dir: &Path) -> Result<()> {
    let mut paths = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| has_image_extension(path))
        .collect::<Vec<PathBuf>>();
    paths.sort();

    println!("Processing {} images in: {}", paths.len(), dir.display());
    println!();

    for (path, result) in paths.iter().zip(scanner.evaluate_many(&paths)) {
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        match result {
            Ok(result) => {
                let status = if result.is_screenshot { "✓ Screenshot" } else { "✗ Not Screenshot" };
                println!("{:30} {:20} Score: {}/13", name, status, result.score);
            }
            Err(e) => println!("{:30} ⚠ {}", name, e),
        }
    }

    Ok(())
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}
