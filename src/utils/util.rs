use super::Error;

pub type Result<T> = std::result::Result<T, Error>;

pub fn handle_error_and_exit(err: Error) -> ! {
    log::error!("{}", err);
    std::process::exit(1);
}
