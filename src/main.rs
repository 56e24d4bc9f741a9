fn main() {
    keyviz::logging::init();

    #[cfg(target_os = "windows")]
    keyviz::platform::windows::run();

    #[cfg(not(target_os = "windows"))]
    {
        log::error!("KeyViz needs the Windows global hotkey API; this platform has no shell");
        std::process::exit(1);
    }
}
