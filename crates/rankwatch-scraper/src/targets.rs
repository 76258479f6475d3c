//! Leaderboard URLs and the selectors that locate entries on them.

use rankwatch_core::{Store, Target};

/// One app block on an appfigures top-apps page.
pub const TOP_APPS_ENTRY_SELECTOR: &str = "div.s445742525-0";
/// The `"<rank>. <name>"` link inside each block.
pub const RANK_NAME_LINK_SELECTOR: &str = "a.s-4262409-0";

pub const APPLE_TITLE_SELECTOR: &str = "h1.product-header__title";
pub const APPLE_CHART_SELECTOR: &str = "a.inline-list__item";

pub const DEFAULT_APP_PAGE_URL: &str =
    "https://apps.apple.com/us/app/coinbase-buy-bitcoin-ether/id886427730";

pub const DEFAULT_COUNTRIES: [&str; 2] = ["united-states", "united-kingdom"];

/// Free finance leaderboard for the target's country and store.
#[must_use]
pub fn leaderboard_url(target: &Target) -> String {
    match target.store {
        Store::Ios => format!(
            "https://appfigures.com/top-apps/ios-app-store/{}/iphone/finance?list=free",
            target.country
        ),
        Store::Play => format!(
            "https://appfigures.com/top-apps/google-play/{}/finance",
            target.country
        ),
    }
}

/// Targets of the wide tracked-apps report, in column-group order.
#[must_use]
pub fn tracked_targets() -> Vec<Target> {
    [Store::Ios, Store::Play]
        .into_iter()
        .flat_map(|store| {
            DEFAULT_COUNTRIES
                .into_iter()
                .map(move |country| Target::new(country, store))
        })
        .collect()
}
