use anyhow::Result;

pub fn run() -> Result<()> {
    println!("agentgraph {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
