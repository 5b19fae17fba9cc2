use tracing::Level;

fn main() -> Result<(), tracing_prettyjson::Error> {
    tracing_prettyjson::builder()
        .style("github")
        .level(Level::DEBUG)
        .add_source(true)
        .build()?
        .init()?;

    tracing::info!(key1 = "value1", key2 = 42, key3 = true, "This is an info message");

    Ok(())
}
