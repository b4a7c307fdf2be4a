fn main() -> anyhow::Result<()> {
    moodlens_lib::run()
}
