fn main() -> anyhow::Result<()> {
    onthisday_explorer::cli::run()
}
