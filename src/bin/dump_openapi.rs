fn main() -> anyhow::Result<()> {
    let port = std::env::args()
        .nth(1)
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8000);

    let doc = voyage_access::docs::build_openapi(port)?;
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
