use funil_config::{ENV_PREFIX, FunilConfig};

const SECTIONS: [&str; 3] = ["SUPABASE", "BOARD", "GENERAL"];

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &FunilConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &FunilConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    for section in SECTIONS {
        let single = format!("{ENV_PREFIX}{section}_");
        let nested = format!("{ENV_PREFIX}{section}__");
        if let Some(key) = env_keys
            .iter()
            .find(|key| key.starts_with(&single) && !key.starts_with(&nested))
        {
            let field = &key[single.len()..];
            warnings.push(format!(
                "{key} is ignored. Use double underscores (example: {nested}{field})."
            ));
        }
    }

    if !config.supabase.is_configured()
        && env_keys
            .iter()
            .any(|key| key.starts_with(&format!("{ENV_PREFIX}SUPABASE__")))
    {
        warnings.push(
            "Supabase config is incomplete: url, api_key and user_id are all required."
                .to_string(),
        );
    }

    warnings
}
