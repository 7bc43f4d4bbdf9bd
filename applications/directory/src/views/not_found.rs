/// Fallback view for unknown locations
use super::centred;
use crate::routes::USERS_PATH;

pub fn render_not_found() -> String {
    [
        centred("404"),
        String::new(),
        centred("Page Not Found"),
        String::new(),
        centred("Sorry, we couldn't find the page you're looking for."),
        centred("The page might have been moved, deleted, or you entered the wrong URL."),
        String::new(),
        centred(&format!("[Go to Users] {}", USERS_PATH)),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_texts() {
        let view = render_not_found();
        assert!(view.contains("404"));
        assert!(view.contains("Page Not Found"));
        assert!(view.contains("Go to Users"));
    }
}
