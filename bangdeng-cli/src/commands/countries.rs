use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use bangdeng_core::Country;

pub(crate) fn run_countries() {
    log::info!("Countries:");
    crate::log_blank();

    for country in Country::all() {
        let b = &country.bbox;
        log::info!(
            "  {} {:<24} {}",
            country.code.if_supports_color(Stdout, |t| t.bold()),
            country.name,
            country.key.if_supports_color(Stdout, |t| t.cyan()),
        );
        log::debug!(
            "      bbox W {} S {} E {} N {}",
            b.west,
            b.south,
            b.east,
            b.north
        );
    }
}
