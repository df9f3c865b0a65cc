use std::{collections::HashMap, sync::LazyLock};

use crate::code::{ConditionCode, TimeOfDay};

/// Icon filenames for one condition code. Either time-of-day field may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IconMapping {
    pub day: Option<&'static str>,
    pub night: Option<&'static str>,
    /// Whether an approved animated counterpart exists.
    pub animated: bool,
    pub fallback: Option<&'static str>,
}

impl IconMapping {
    pub const fn new(day: &'static str, night: &'static str) -> Self {
        Self { day: Some(day), night: Some(night), animated: false, fallback: None }
    }

    pub const fn animated(mut self) -> Self {
        self.animated = true;
        self
    }

    pub const fn with_fallback(mut self, fallback: &'static str) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Filename for the given time of day; empty strings count as missing.
    pub fn variant(&self, time_of_day: TimeOfDay) -> Option<&'static str> {
        let name = match time_of_day {
            TimeOfDay::Day => self.day,
            TimeOfDay::Night => self.night,
        };
        name.filter(|n| !n.is_empty())
    }

    pub fn fallback(&self) -> Option<&'static str> {
        self.fallback.filter(|n| !n.is_empty())
    }
}

/// Lookup tables consulted by the resolver. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct IconTable {
    mappings: HashMap<ConditionCode, IconMapping>,
    gifs: HashMap<ConditionCode, &'static str>,
    descriptions: HashMap<ConditionCode, (&'static str, &'static str)>,
}

impl IconTable {
    /// The compiled-in table for the provider's condition vocabulary.
    pub fn builtin() -> &'static IconTable {
        &BUILTIN
    }

    pub fn builder() -> IconTableBuilder {
        IconTableBuilder::default()
    }

    pub fn mapping(&self, code: ConditionCode) -> Option<&IconMapping> {
        self.mappings.get(&code)
    }

    pub fn gif(&self, code: ConditionCode) -> Option<&'static str> {
        self.gifs.get(&code).copied().filter(|n| !n.is_empty())
    }

    pub fn description(&self, code: ConditionCode, time_of_day: TimeOfDay) -> Option<&'static str> {
        self.descriptions.get(&code).map(|(day, night)| match time_of_day {
            TimeOfDay::Day => *day,
            TimeOfDay::Night => *night,
        })
    }

    pub fn codes(&self) -> impl Iterator<Item = ConditionCode> + '_ {
        self.mappings.keys().copied()
    }

    pub fn gif_codes(&self) -> impl Iterator<Item = ConditionCode> + '_ {
        self.gifs.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct IconTableBuilder {
    table: IconTable,
}

impl IconTableBuilder {
    pub fn mapping(mut self, code: impl Into<ConditionCode>, mapping: IconMapping) -> Self {
        self.table.mappings.insert(code.into(), mapping);
        self
    }

    pub fn gif(mut self, code: impl Into<ConditionCode>, filename: &'static str) -> Self {
        self.table.gifs.insert(code.into(), filename);
        self
    }

    pub fn description(
        mut self,
        code: impl Into<ConditionCode>,
        day: &'static str,
        night: &'static str,
    ) -> Self {
        self.table.descriptions.insert(code.into(), (day, night));
        self
    }

    pub fn build(self) -> IconTable {
        self.table
    }
}

struct Row {
    code: u32,
    day: &'static str,
    night: &'static str,
    animated: bool,
    fallback: Option<&'static str>,
    day_text: &'static str,
    night_text: &'static str,
}

const fn row(
    code: u32,
    day: &'static str,
    night: &'static str,
    animated: bool,
    fallback: Option<&'static str>,
    text: (&'static str, &'static str),
) -> Row {
    Row { code, day, night, animated, fallback, day_text: text.0, night_text: text.1 }
}

const fn same(text: &'static str) -> (&'static str, &'static str) {
    (text, text)
}

#[rustfmt::skip]
const ROWS: &[Row] = &[
    row(1000, "clear-day.svg", "clear-night.svg", true, None, ("Sunny", "Clear")),
    row(1003, "partly-cloudy-day.svg", "partly-cloudy-night.svg", true, Some("cloudy.svg"), same("Partly cloudy")),
    row(1006, "cloudy.svg", "cloudy.svg", true, None, same("Cloudy")),
    row(1009, "overcast-day.svg", "overcast-night.svg", true, Some("overcast.svg"), same("Overcast")),
    row(1030, "mist.svg", "mist.svg", false, Some("fog.svg"), same("Mist")),
    row(1063, "partly-cloudy-day-rain.svg", "partly-cloudy-night-rain.svg", true, Some("rain.svg"), same("Patchy rain possible")),
    row(1066, "partly-cloudy-day-snow.svg", "partly-cloudy-night-snow.svg", true, Some("snow.svg"), same("Patchy snow possible")),
    row(1069, "partly-cloudy-day-sleet.svg", "partly-cloudy-night-sleet.svg", true, Some("sleet.svg"), same("Patchy sleet possible")),
    row(1072, "partly-cloudy-day-drizzle.svg", "partly-cloudy-night-drizzle.svg", true, Some("drizzle.svg"), same("Patchy freezing drizzle possible")),
    row(1087, "thunderstorms-day.svg", "thunderstorms-night.svg", true, Some("thunderstorms.svg"), same("Thundery outbreaks possible")),
    row(1114, "wind-snow.svg", "wind-snow.svg", true, Some("snow.svg"), same("Blowing snow")),
    row(1117, "extreme-snow.svg", "extreme-snow.svg", true, Some("snow.svg"), same("Blizzard")),
    row(1135, "fog-day.svg", "fog-night.svg", true, Some("fog.svg"), same("Fog")),
    row(1147, "extreme-fog.svg", "extreme-fog.svg", false, Some("fog.svg"), same("Freezing fog")),
    row(1150, "partly-cloudy-day-drizzle.svg", "partly-cloudy-night-drizzle.svg", true, Some("drizzle.svg"), same("Patchy light drizzle")),
    row(1153, "drizzle.svg", "drizzle.svg", true, None, same("Light drizzle")),
    row(1168, "overcast-drizzle.svg", "overcast-drizzle.svg", true, Some("drizzle.svg"), same("Freezing drizzle")),
    row(1171, "extreme-drizzle.svg", "extreme-drizzle.svg", true, Some("drizzle.svg"), same("Heavy freezing drizzle")),
    row(1180, "partly-cloudy-day-rain.svg", "partly-cloudy-night-rain.svg", true, Some("rain.svg"), same("Patchy light rain")),
    row(1183, "rain.svg", "rain.svg", true, None, same("Light rain")),
    row(1186, "overcast-day-rain.svg", "overcast-night-rain.svg", true, Some("rain.svg"), same("Moderate rain at times")),
    row(1189, "overcast-rain.svg", "overcast-rain.svg", true, Some("rain.svg"), same("Moderate rain")),
    row(1192, "extreme-day-rain.svg", "extreme-night-rain.svg", true, Some("extreme-rain.svg"), same("Heavy rain at times")),
    row(1195, "extreme-rain.svg", "extreme-rain.svg", true, Some("rain.svg"), same("Heavy rain")),
    row(1198, "overcast-sleet.svg", "overcast-sleet.svg", true, Some("sleet.svg"), same("Light freezing rain")),
    row(1201, "extreme-sleet.svg", "extreme-sleet.svg", true, Some("sleet.svg"), same("Moderate or heavy freezing rain")),
    row(1204, "sleet.svg", "sleet.svg", true, None, same("Light sleet")),
    row(1207, "extreme-sleet.svg", "extreme-sleet.svg", true, Some("sleet.svg"), same("Moderate or heavy sleet")),
    row(1210, "partly-cloudy-day-snow.svg", "partly-cloudy-night-snow.svg", true, Some("snow.svg"), same("Patchy light snow")),
    row(1213, "snow.svg", "snow.svg", true, None, same("Light snow")),
    row(1216, "overcast-day-snow.svg", "overcast-night-snow.svg", true, Some("snow.svg"), same("Patchy moderate snow")),
    row(1219, "overcast-snow.svg", "overcast-snow.svg", true, Some("snow.svg"), same("Moderate snow")),
    row(1222, "extreme-day-snow.svg", "extreme-night-snow.svg", true, Some("extreme-snow.svg"), same("Patchy heavy snow")),
    row(1225, "extreme-snow.svg", "extreme-snow.svg", true, Some("snow.svg"), same("Heavy snow")),
    row(1237, "hail.svg", "hail.svg", true, None, same("Ice pellets")),
    row(1240, "partly-cloudy-day-rain.svg", "partly-cloudy-night-rain.svg", true, Some("rain.svg"), same("Light rain shower")),
    row(1243, "overcast-day-rain.svg", "overcast-night-rain.svg", true, Some("rain.svg"), same("Moderate or heavy rain shower")),
    row(1246, "extreme-rain.svg", "extreme-rain.svg", true, Some("rain.svg"), same("Torrential rain shower")),
    row(1249, "partly-cloudy-day-sleet.svg", "partly-cloudy-night-sleet.svg", true, Some("sleet.svg"), same("Light sleet showers")),
    row(1252, "overcast-day-sleet.svg", "overcast-night-sleet.svg", true, Some("sleet.svg"), same("Moderate or heavy sleet showers")),
    row(1255, "partly-cloudy-day-snow.svg", "partly-cloudy-night-snow.svg", true, Some("snow.svg"), same("Light snow showers")),
    row(1258, "overcast-day-snow.svg", "overcast-night-snow.svg", true, Some("snow.svg"), same("Moderate or heavy snow showers")),
    row(1261, "partly-cloudy-day-hail.svg", "partly-cloudy-night-hail.svg", true, Some("hail.svg"), same("Light showers of ice pellets")),
    row(1264, "overcast-day-hail.svg", "overcast-night-hail.svg", true, Some("hail.svg"), same("Moderate or heavy showers of ice pellets")),
    row(1273, "thunderstorms-day-rain.svg", "thunderstorms-night-rain.svg", true, Some("thunderstorms-rain.svg"), same("Patchy light rain with thunder")),
    row(1276, "thunderstorms-rain.svg", "thunderstorms-rain.svg", true, Some("thunderstorms.svg"), same("Moderate or heavy rain with thunder")),
    row(1279, "thunderstorms-day-snow.svg", "thunderstorms-night-snow.svg", true, Some("thunderstorms-snow.svg"), same("Patchy light snow with thunder")),
    row(1282, "thunderstorms-snow.svg", "thunderstorms-snow.svg", true, Some("thunderstorms.svg"), same("Moderate or heavy snow with thunder")),
];

/// Conditions that have a bespoke animated loop.
#[rustfmt::skip]
const GIF_OVERRIDES: &[(u32, &str)] = &[
    (1000, "sunrise.gif"),
    (1003, "partly-cloudy.gif"),
    (1006, "clouds.gif"),
    (1009, "clouds.gif"),
    (1063, "rain.gif"),
    (1087, "thunderstorm.gif"),
    (1135, "fog.gif"),
    (1183, "rain.gif"),
    (1189, "rain.gif"),
    (1195, "heavy-rain.gif"),
    (1213, "snow.gif"),
    (1219, "snow.gif"),
    (1225, "snow.gif"),
    (1273, "thunderstorm.gif"),
    (1276, "thunderstorm.gif"),
];

static BUILTIN: LazyLock<IconTable> = LazyLock::new(|| {
    let mut builder = IconTable::builder();

    for r in ROWS {
        let mut mapping = IconMapping::new(r.day, r.night);
        if r.animated {
            mapping = mapping.animated();
        }
        if let Some(fallback) = r.fallback {
            mapping = mapping.with_fallback(fallback);
        }

        builder = builder.mapping(r.code, mapping).description(r.code, r.day_text, r.night_text);
    }

    for (code, filename) in GIF_OVERRIDES {
        builder = builder.gif(*code, *filename);
    }

    builder.build()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_provider_vocabulary() {
        let table = IconTable::builtin();
        assert_eq!(table.len(), 48);
        assert!(table.mapping(ConditionCode(1000)).is_some());
        assert!(table.mapping(ConditionCode(1282)).is_some());
        assert!(table.mapping(ConditionCode(9999)).is_none());
    }

    #[test]
    fn every_builtin_entry_has_a_time_of_day_variant() {
        let table = IconTable::builtin();
        for code in table.codes() {
            let m = table.mapping(code).unwrap();
            assert!(
                m.variant(TimeOfDay::Day).is_some() || m.variant(TimeOfDay::Night).is_some(),
                "code {code} has neither day nor night icon"
            );
        }
    }

    #[test]
    fn gif_overrides_are_a_subset_of_mappings() {
        let table = IconTable::builtin();
        for code in table.gif_codes() {
            assert!(table.mapping(code).is_some(), "gif override {code} has no mapping");
        }
    }

    #[test]
    fn empty_filenames_are_treated_as_missing() {
        let mapping = IconMapping { day: Some(""), night: Some("moon.svg"), animated: false, fallback: Some("") };
        assert_eq!(mapping.variant(TimeOfDay::Day), None);
        assert_eq!(mapping.variant(TimeOfDay::Night), Some("moon.svg"));
        assert_eq!(mapping.fallback(), None);
    }

    #[test]
    fn descriptions_depend_on_time_of_day() {
        let table = IconTable::builtin();
        assert_eq!(table.description(ConditionCode(1000), TimeOfDay::Day), Some("Sunny"));
        assert_eq!(table.description(ConditionCode(1000), TimeOfDay::Night), Some("Clear"));
        assert_eq!(table.description(ConditionCode(42), TimeOfDay::Day), None);
    }
}
