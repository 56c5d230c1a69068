#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // File dialogs run as tokio tasks.
    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    graph_sketch::run_app()?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
