fn main() -> Result<(), water_grab::config::ConfigError> {
    water_grab::run()
}
