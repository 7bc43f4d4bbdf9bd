/// Page chrome around every view
use super::{rule, WIDTH};

/// Which header a page gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chrome {
    /// Title and navigation
    List,
    /// Back link to the list
    Detail,
}

pub fn render_layout(chrome: Chrome, body: &str) -> String {
    let header = match chrome {
        Chrome::List => {
            let title = "User Management";
            let nav = "[Users]";
            format!("{}{:>width$}", title, nav, width = WIDTH - title.len())
        }
        Chrome::Detail => {
            let back = "< Back to Users";
            let nav = "Users";
            format!("{}{:>width$}", back, nav, width = WIDTH - back.len())
        }
    };

    let footer_left = "(c) 2024.";
    let footer_right = "Powered by tanta pazienza";

    let lines = [
        rule('='),
        header,
        rule('='),
        String::new(),
        body.trim_end().to_string(),
        String::new(),
        rule('-'),
        format!(
            "{}{:>width$}",
            footer_left,
            footer_right,
            width = WIDTH - footer_left.len()
        ),
    ];
    lines.join("\n") + "\n"
}
