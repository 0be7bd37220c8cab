mod app;
mod input;
mod render;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("desk-cat {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    app::run(args)
}
