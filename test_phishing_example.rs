#![allow(clippy::uninlined_format_args)]

use phishhawk::{EmailAnalyzer, UploadedFile};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Testing the PayPal look-alike phishing example...");

    let email = r#"From: alerts@paypal-security.com
Return-Path: <bounce@evil.ru>
Subject: Action required
<html><body>
<p>We noticed unusual activity.</p>
<a href="http://evil.ru/login">Verify your account</a> now or your account locked!
Backup copy: https://storage.googleapis.com/pp-backup/login.html
</body></html>"#;

    let analyzer = EmailAnalyzer::new();

    println!();
    println!("=== Pasted content ===");
    let result = analyzer.analyze_email_content(email);
    println!("{}", serde_json::to_string_pretty(&result)?);

    println!();
    println!("=== Same email as an uploaded .eml ===");
    let upload = UploadedFile::new(Some("paypal.eml".to_string()), email.as_bytes().to_vec());
    let from_upload = analyzer.analyze_email(Some(&upload));
    println!("Suspicious: {}", from_upload.suspicious);
    println!("Same verdict as pasted: {}", from_upload == result);

    println!();
    println!("=== Blank submission ===");
    let blank = analyzer.analyze_email_content("   ");
    println!("Summary: {}", blank.analysis_summary);

    Ok(())
}
