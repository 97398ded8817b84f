use crate::profile::Profile;

/// Render the profile-derived text injected into every chat prompt.
///
/// `"User's name: {name}. "` when a name is set, then
/// `"Preferences: k1: v1, k2: v2. "` when any preferences exist, in
/// insertion order. Empty when there is no active profile.
pub fn build_context(profile: Option<&Profile>) -> String {
    let Some(profile) = profile else {
        return String::new();
    };

    let mut context = String::new();

    if let Some(name) = profile.name.as_deref().filter(|n| !n.is_empty()) {
        context.push_str(&format!("User's name: {}. ", name));
    }

    if !profile.preferences.is_empty() {
        let prefs = profile
            .preferences
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join(", ");
        context.push_str(&format!("Preferences: {}. ", prefs));
    }

    context
}
