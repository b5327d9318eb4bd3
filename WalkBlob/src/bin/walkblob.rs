fn main() -> anyhow::Result<()> {
    walkblob::cli::run_cli()
}
