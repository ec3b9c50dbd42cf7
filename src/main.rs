fn main() -> anyhow::Result<()> {
    labdesk_lib::run()
}
