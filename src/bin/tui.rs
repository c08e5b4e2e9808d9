fn main() -> anyhow::Result<()> {
    dailynews::tui::run()
}
