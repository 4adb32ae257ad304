use crate::data::{Candidate, ConfigRule};
use crate::error::Result;
use crate::locale::{Locale, MessageKey};
use crate::matcher::match_rule;
use crate::paths::{self, Subsystem};
use std::collections::HashSet;
use std::path::PathBuf;

/// Side-effecting services the dispatcher runs against.
#[allow(async_fn_in_trait)]
pub trait Host {
    /// Asks for a file when none was given. `None` means nothing to open.
    async fn active_file(&mut self, placeholder: &str) -> Result<Option<PathBuf>>;

    async fn pick_one(&mut self, items: &[String], placeholder: &str) -> Result<Option<String>>;

    async fn pick_many(
        &mut self,
        items: &[String],
        placeholder: &str,
    ) -> Result<Option<Vec<String>>>;

    fn show_error(&mut self, message: &str);

    /// Starts `candidate` (or the default handler) on `file_path` without
    /// waiting for it.
    fn launch(&mut self, file_path: &str, candidate: Option<Candidate<'_>>) -> Result<()>;

    fn open_externally(&mut self, uri: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct Environment {
    pub subsystem: Subsystem,
    pub locale: Locale,
    /// Relative targets resolve against this directory.
    pub cwd: PathBuf,
}

impl Environment {
    pub fn detect(cwd: PathBuf) -> Self {
        Self {
            subsystem: Subsystem::detect(),
            locale: Locale::detect(),
            cwd,
        }
    }
}

/// Resolves `target` (or the active file), matches it against `rules` and
/// launches whatever the match calls for.
pub async fn open_in_external_app<H: Host>(
    host: &mut H,
    env: &Environment,
    rules: &[ConfigRule],
    target: Option<PathBuf>,
    launch_multiple: bool,
) -> Result<()> {
    let target = match target {
        Some(path) => Some(path),
        None => {
            host.active_file(env.locale.text(MessageKey::SelectFilePlaceholder))
                .await?
        }
    };
    let Some(target) = target.filter(|path| !path.as_os_str().is_empty()) else {
        tracing::debug!("no target file");
        return Ok(());
    };

    // Translation and file URIs both need an absolute path
    let target = env.cwd.join(target);
    let file_path = env.subsystem.native_path(&target);
    let extension = paths::extension_name(&file_path);
    let matched = match_rule(extension, rules);
    tracing::debug!(
        file = %file_path,
        extension = ?extension,
        matched = ?matched.map(|rule| &rule.extension_name),
        "resolved rule"
    );

    dispatch(host, env, &file_path, matched, launch_multiple).await
}

pub async fn dispatch<H: Host>(
    host: &mut H,
    env: &Environment,
    file_path: &str,
    matched: Option<&ConfigRule>,
    launch_multiple: bool,
) -> Result<()> {
    let candidates = matched
        .map(|rule| rule.apps.candidates())
        .unwrap_or_default();

    match candidates.as_slice() {
        [] => {
            if matched.is_some() {
                tracing::warn!("matched rule has no usable apps, using default strategy");
            }
            open_with_default(host, env, file_path);
            Ok(())
        }
        [only] => {
            launch(host, file_path, Some(*only));
            Ok(())
        }
        _ => pick_and_launch(host, env, file_path, &candidates, launch_multiple).await,
    }
}

async fn pick_and_launch<H: Host>(
    host: &mut H,
    env: &Environment,
    file_path: &str,
    candidates: &[Candidate<'_>],
    launch_multiple: bool,
) -> Result<()> {
    if has_duplicate_titles(candidates) {
        tracing::error!("apps with duplicate titles in one rule");
        host.show_error(env.locale.text(MessageKey::SameTitleMultipleApp));
        return Ok(());
    }

    let titles: Vec<String> = candidates
        .iter()
        .filter_map(|candidate| candidate.title())
        .map(str::to_string)
        .collect();
    let by_title = |title: &str| {
        candidates
            .iter()
            .copied()
            .find(|candidate| candidate.title() == Some(title))
    };

    if launch_multiple {
        let placeholder = env.locale.text(MessageKey::SelectAppsPlaceholder);
        let Some(selected) = host.pick_many(&titles, placeholder).await? else {
            tracing::debug!("selection cancelled");
            return Ok(());
        };
        // Each launch stands alone; one failing does not stop the rest.
        for title in &selected {
            if let Some(candidate) = by_title(title) {
                launch(host, file_path, Some(candidate));
            }
        }
    } else {
        let placeholder = env.locale.text(MessageKey::SelectAppPlaceholder);
        let Some(selected) = host.pick_one(&titles, placeholder).await? else {
            tracing::debug!("selection cancelled");
            return Ok(());
        };
        if let Some(candidate) = by_title(&selected) {
            launch(host, file_path, Some(candidate));
        }
    }

    Ok(())
}

fn has_duplicate_titles(candidates: &[Candidate<'_>]) -> bool {
    let mut seen = HashSet::new();
    candidates
        .iter()
        .filter_map(|candidate| candidate.title())
        .any(|title| !seen.insert(title))
}

fn launch<H: Host>(host: &mut H, file_path: &str, candidate: Option<Candidate<'_>>) {
    tracing::info!(file = %file_path, app = ?candidate, "launching");
    if let Err(e) = host.launch(file_path, candidate) {
        tracing::warn!(file = %file_path, "{}", e);
    }
}

fn open_with_default<H: Host>(host: &mut H, env: &Environment, file_path: &str) {
    if env.subsystem.is_wsl() {
        // The native open action is unreliable for paths inside the subsystem.
        launch(host, file_path, None);
    } else {
        let uri = paths::file_uri(file_path);
        tracing::info!(uri = %uri, "opening with default application");
        if let Err(e) = host.open_externally(&uri) {
            tracing::warn!(uri = %uri, "{}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::rules::Apps;
    use crate::data::rules::{app, rule};
    use crate::error::OpenError;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct FakeHost {
        active_file: Option<PathBuf>,
        picks: VecDeque<Option<Vec<String>>>,
        pick_calls: Vec<(Vec<String>, bool)>,
        errors: Vec<String>,
        launches: Vec<(String, Option<String>)>,
        opened: Vec<String>,
        failing: HashSet<String>,
    }

    impl FakeHost {
        fn picking(picks: &[Option<&[&str]>]) -> Self {
            Self {
                picks: picks
                    .iter()
                    .map(|pick| pick.map(|titles| titles.iter().map(|t| t.to_string()).collect()))
                    .collect(),
                ..Self::default()
            }
        }

        fn launched_apps(&self) -> Vec<Option<&str>> {
            self.launches.iter().map(|(_, app)| app.as_deref()).collect()
        }
    }

    impl Host for FakeHost {
        async fn active_file(&mut self, _placeholder: &str) -> Result<Option<PathBuf>> {
            Ok(self.active_file.clone())
        }

        async fn pick_one(&mut self, items: &[String], _placeholder: &str) -> Result<Option<String>> {
            self.pick_calls.push((items.to_vec(), false));
            let pick = self.picks.pop_front().flatten();
            Ok(pick.and_then(|titles| titles.into_iter().next()))
        }

        async fn pick_many(
            &mut self,
            items: &[String],
            _placeholder: &str,
        ) -> Result<Option<Vec<String>>> {
            self.pick_calls.push((items.to_vec(), true));
            Ok(self.picks.pop_front().flatten())
        }

        fn show_error(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }

        fn launch(&mut self, file_path: &str, candidate: Option<Candidate<'_>>) -> Result<()> {
            let label = candidate.map(|c| match c {
                Candidate::Named(name) => name.to_string(),
                Candidate::App(app) => app.title.clone(),
            });
            if let Some(ref label) = label
                && self.failing.contains(label)
            {
                return Err(OpenError::LaunchFailed(format!("{} not found in PATH", label)));
            }
            self.launches.push((file_path.to_string(), label));
            Ok(())
        }

        fn open_externally(&mut self, uri: &str) -> Result<()> {
            self.opened.push(uri.to_string());
            Ok(())
        }
    }

    fn native() -> Environment {
        Environment {
            subsystem: Subsystem::Native,
            locale: Locale::En,
            cwd: PathBuf::from("/home/me"),
        }
    }

    fn wsl() -> Environment {
        Environment {
            subsystem: Subsystem::Wsl {
                distro: "Ubuntu".into(),
            },
            locale: Locale::En,
            cwd: PathBuf::from("/home/me"),
        }
    }

    fn list(titles: &[&str]) -> Apps {
        Apps::List(titles.iter().map(|t| app(t)).collect())
    }

    #[tokio::test]
    async fn test_named_app_launches_without_picker() {
        let mut host = FakeHost::default();
        let rule = rule(&["md"], Apps::Named("code".into()));

        dispatch(&mut host, &native(), "/tmp/a.md", Some(&rule), false)
            .await
            .unwrap();

        assert_eq!(host.launched_apps(), vec![Some("code")]);
        assert!(host.pick_calls.is_empty());
    }

    #[tokio::test]
    async fn test_single_entry_list_launches_directly() {
        let mut host = FakeHost::default();
        let rule = rule(&["md"], list(&["A"]));

        dispatch(&mut host, &native(), "/tmp/a.md", Some(&rule), true)
            .await
            .unwrap();

        assert_eq!(host.launched_apps(), vec![Some("A")]);
        assert!(host.pick_calls.is_empty());
    }

    #[tokio::test]
    async fn test_single_descriptor_launches_directly() {
        let mut host = FakeHost::default();
        let rule = rule(&["md"], Apps::Single(app("Solo")));

        dispatch(&mut host, &native(), "/tmp/a.md", Some(&rule), false)
            .await
            .unwrap();

        assert_eq!(host.launched_apps(), vec![Some("Solo")]);
    }

    #[tokio::test]
    async fn test_duplicate_titles_abort_before_picker() {
        let mut host = FakeHost::picking(&[Some(&["A"])]);
        let rule = rule(&["md"], list(&["A", "B", "A"]));

        dispatch(&mut host, &native(), "/tmp/a.md", Some(&rule), false)
            .await
            .unwrap();

        assert_eq!(host.errors.len(), 1);
        assert_eq!(host.errors[0], Locale::En.text(MessageKey::SameTitleMultipleApp));
        assert!(host.launches.is_empty());
        assert!(host.pick_calls.is_empty());
        assert!(host.opened.is_empty());
    }

    #[tokio::test]
    async fn test_single_select_launches_chosen() {
        let mut host = FakeHost::picking(&[Some(&["B"])]);
        let rule = rule(&["md"], list(&["A", "B"]));

        dispatch(&mut host, &native(), "/tmp/a.md", Some(&rule), false)
            .await
            .unwrap();

        assert_eq!(host.pick_calls, vec![(vec!["A".into(), "B".into()], false)]);
        assert_eq!(host.launched_apps(), vec![Some("B")]);
    }

    #[tokio::test]
    async fn test_multi_select_launches_each_chosen() {
        let mut host = FakeHost::picking(&[Some(&["A", "B"])]);
        let rule = rule(&["md"], list(&["A", "B", "C"]));

        dispatch(&mut host, &native(), "/tmp/a.md", Some(&rule), true)
            .await
            .unwrap();

        assert_eq!(host.pick_calls.len(), 1);
        assert!(host.pick_calls[0].1);
        let mut launched = host.launched_apps();
        launched.sort();
        assert_eq!(launched, vec![Some("A"), Some("B")]);
        assert!(host.errors.is_empty());
    }

    #[tokio::test]
    async fn test_multi_select_failure_does_not_stop_others() {
        let mut host = FakeHost::picking(&[Some(&["A", "B"])]);
        host.failing.insert("A".into());
        let rule = rule(&["md"], list(&["A", "B"]));

        dispatch(&mut host, &native(), "/tmp/a.md", Some(&rule), true)
            .await
            .unwrap();

        assert_eq!(host.launched_apps(), vec![Some("B")]);
        assert!(host.errors.is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_picker_is_silent() {
        let mut host = FakeHost::picking(&[None]);
        let rule = rule(&["md"], list(&["A", "B"]));

        dispatch(&mut host, &native(), "/tmp/a.md", Some(&rule), false)
            .await
            .unwrap();

        assert!(host.launches.is_empty());
        assert!(host.errors.is_empty());
        assert!(host.opened.is_empty());
    }

    #[tokio::test]
    async fn test_multi_select_empty_selection_launches_nothing() {
        let mut host = FakeHost::picking(&[Some(&[])]);
        let rule = rule(&["md"], list(&["A", "B"]));

        dispatch(&mut host, &native(), "/tmp/a.md", Some(&rule), true)
            .await
            .unwrap();

        assert!(host.launches.is_empty());
        assert!(host.errors.is_empty());
    }

    #[tokio::test]
    async fn test_no_match_native_opens_uri() {
        let mut host = FakeHost::default();

        dispatch(&mut host, &native(), "/tmp/my file.pdf", None, false)
            .await
            .unwrap();

        assert_eq!(host.opened, vec!["file:///tmp/my%20file.pdf".to_string()]);
        assert!(host.launches.is_empty());
    }

    #[tokio::test]
    async fn test_no_match_wsl_launches_default_handler() {
        let mut host = FakeHost::default();

        dispatch(&mut host, &wsl(), "C:\\Users\\me\\a.pdf", None, false)
            .await
            .unwrap();

        assert!(host.opened.is_empty());
        assert_eq!(
            host.launches,
            vec![("C:\\Users\\me\\a.pdf".to_string(), None)]
        );
    }

    #[tokio::test]
    async fn test_invalid_apps_fall_back_to_default() {
        let mut host = FakeHost::default();
        let rule = rule(&["md"], Apps::List(Vec::new()));

        dispatch(&mut host, &native(), "/tmp/a.md", Some(&rule), false)
            .await
            .unwrap();

        assert_eq!(host.opened.len(), 1);
    }

    #[tokio::test]
    async fn test_open_matches_by_extension_and_wildcard() {
        let rules = vec![
            rule(&["*"], Apps::Named("xdg".into())),
            rule(&["md", "txt"], Apps::Named("typora".into())),
        ];

        let mut host = FakeHost::default();
        open_in_external_app(&mut host, &native(), &rules, Some("/tmp/a.txt".into()), false)
            .await
            .unwrap();
        open_in_external_app(&mut host, &native(), &rules, Some("/tmp/a.rs".into()), false)
            .await
            .unwrap();
        open_in_external_app(&mut host, &native(), &rules, Some("/tmp/.bashrc".into()), false)
            .await
            .unwrap();

        assert_eq!(host.launched_apps(), vec![Some("typora"), Some("xdg")]);
        assert_eq!(host.opened, vec!["file:///tmp/.bashrc".to_string()]);
    }

    #[tokio::test]
    async fn test_open_translates_wsl_path_before_launch() {
        let rules = vec![rule(&["md"], Apps::Named("typora.exe".into()))];
        let mut host = FakeHost::default();

        open_in_external_app(&mut host, &wsl(), &rules, Some("/mnt/c/docs/a.md".into()), false)
            .await
            .unwrap();

        assert_eq!(
            host.launches,
            vec![("C:\\docs\\a.md".to_string(), Some("typora.exe".to_string()))]
        );
    }

    #[tokio::test]
    async fn test_open_uses_active_file_when_no_target() {
        let rules = vec![rule(&["md"], Apps::Named("typora".into()))];
        let mut host = FakeHost {
            active_file: Some("/tmp/active.md".into()),
            ..FakeHost::default()
        };

        open_in_external_app(&mut host, &native(), &rules, None, false)
            .await
            .unwrap();

        assert_eq!(
            host.launches,
            vec![("/tmp/active.md".to_string(), Some("typora".to_string()))]
        );
    }

    #[tokio::test]
    async fn test_open_without_target_does_nothing() {
        let rules = vec![rule(&["*"], Apps::Named("xdg".into()))];
        let mut host = FakeHost::default();

        open_in_external_app(&mut host, &native(), &rules, None, false)
            .await
            .unwrap();
        open_in_external_app(&mut host, &native(), &rules, Some(PathBuf::new()), false)
            .await
            .unwrap();

        assert!(host.launches.is_empty());
        assert!(host.opened.is_empty());
        assert!(host.errors.is_empty());
    }

    #[tokio::test]
    async fn test_relative_target_opens_absolute_uri() {
        let mut host = FakeHost::default();

        open_in_external_app(&mut host, &native(), &[], Some("notes.pdf".into()), false)
            .await
            .unwrap();

        assert_eq!(host.opened, vec!["file:///home/me/notes.pdf".to_string()]);
    }

    #[tokio::test]
    async fn test_relative_target_translates_from_cwd_under_wsl() {
        let rules = vec![rule(&["md"], Apps::Named("typora.exe".into()))];
        let mut host = FakeHost::default();

        open_in_external_app(&mut host, &wsl(), &rules, Some("docs/a.md".into()), false)
            .await
            .unwrap();

        assert_eq!(
            host.launches,
            vec![(
                "\\\\wsl.localhost\\Ubuntu\\home\\me\\docs\\a.md".to_string(),
                Some("typora.exe".to_string())
            )]
        );
    }
}
