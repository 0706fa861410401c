use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTone {
    Neutral,
    Good,
    Warning,
    Bad,
}

impl CardTone {
    fn class(&self) -> &'static str {
        match self {
            CardTone::Neutral => "stat-card",
            CardTone::Good => "stat-card stat-card--success",
            CardTone::Warning => "stat-card stat-card--warning",
            CardTone::Bad => "stat-card stat-card--error",
        }
    }
}

/// Thin-space thousands grouping: 12345 -> "12 345"
pub fn format_thousands(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('\u{00a0}');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

#[component]
pub fn StatCard(
    /// Label displayed above the value
    label: &'static str,
    /// Icon name from the icon() helper
    icon_name: &'static str,
    /// None while loading or after a failed fetch
    #[prop(into)]
    value: Signal<Option<u64>>,
    #[prop(into, optional)]
    tone: Option<Signal<CardTone>>,
    /// Optional subtitle below the value
    #[prop(into, optional)]
    subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let class = move || tone.map(|t| t.get()).unwrap_or(CardTone::Neutral).class();
    let formatted = move || match value.get() {
        Some(v) => format_thousands(v),
        None => "—".to_string(),
    };

    view! {
        <div class=class>
            <div class="stat-card__icon">{icon(icon_name)}</div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{formatted}</div>
                {move || subtitle.get().map(|s| view! { <div class="stat-card__subtitle">{s}</div> })}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(12_345), "12\u{00a0}345");
        assert_eq!(format_thousands(1_000_000), "1\u{00a0}000\u{00a0}000");
    }
}
