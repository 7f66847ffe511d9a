fn main() -> anyhow::Result<()> {
    drill_cli::run()
}
