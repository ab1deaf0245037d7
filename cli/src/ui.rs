use colored::Colorize;

pub trait FancyToString {
    fn fancy(&self) -> String;
}

impl FancyToString for http::StatusCode {
    fn fancy(&self) -> String {
        if self.is_success() {
            self.to_string().green().to_string()
        } else if self.is_server_error() {
            self.to_string().red().to_string()
        } else {
            self.to_string().yellow().to_string()
        }
    }
}
