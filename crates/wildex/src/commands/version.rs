pub fn run() -> anyhow::Result<()> {
    println!("wildex {}", env!("CARGO_PKG_VERSION"));
    println!("Viewpoint-diverse annotation downloads for wildlife encounter exports");
    Ok(())
}
