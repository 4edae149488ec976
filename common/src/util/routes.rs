pub const ROOT_ROUTE: &str = "/";
pub const CONVERT_ROUTE: &str = "/convert";
pub const HEALTH_ROUTE: &str = "/health";

pub fn convert_url(base: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), CONVERT_ROUTE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_url_joins_without_double_slash() {
        assert_eq!(convert_url("http://localhost:8000"), "http://localhost:8000/convert");
        assert_eq!(convert_url("http://localhost:8000/"), "http://localhost:8000/convert");
    }
}
