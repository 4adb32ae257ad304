use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    En,
    ZhCn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    SameTitleMultipleApp,
    SelectAppPlaceholder,
    SelectAppsPlaceholder,
    SelectFilePlaceholder,
}

impl Locale {
    /// First non-empty of `LC_ALL`, `LC_MESSAGES`, `LANG`.
    pub fn detect() -> Self {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| env::var(var).ok())
            .find(|value| !value.is_empty())
            .map(|value| Self::from_tag(&value))
            .unwrap_or(Locale::En)
    }

    pub fn from_tag(tag: &str) -> Self {
        if tag.to_ascii_lowercase().starts_with("zh") {
            Locale::ZhCn
        } else {
            Locale::En
        }
    }

    pub fn text(self, key: MessageKey) -> &'static str {
        match (self, key) {
            (Locale::En, MessageKey::SameTitleMultipleApp) => {
                "Multiple apps are configured with the same title, which is ambiguous. Please give each app a unique title."
            }
            (Locale::En, MessageKey::SelectAppPlaceholder) => "Select the app to open the file with",
            (Locale::En, MessageKey::SelectAppsPlaceholder) => {
                "Select the apps to open the file with"
            }
            (Locale::En, MessageKey::SelectFilePlaceholder) => "Select the file to open",
            (Locale::ZhCn, MessageKey::SameTitleMultipleApp) => {
                "配置了多个标题相同的应用，无法区分。请为每个应用设置唯一的标题。"
            }
            (Locale::ZhCn, MessageKey::SelectAppPlaceholder) => "选择用来打开文件的应用",
            (Locale::ZhCn, MessageKey::SelectAppsPlaceholder) => "选择用来打开文件的多个应用",
            (Locale::ZhCn, MessageKey::SelectFilePlaceholder) => "选择要打开的文件",
        }
    }
}
