pub fn run() -> anyhow::Result<()> {
    println!("externalize {}", env!("CARGO_PKG_VERSION"));
    println!("Event selection, mapping and routing for externalization");
    Ok(())
}
