use serde::Serialize;

use crate::{
    assets::{self, DEFAULT_ICON, GIF_BASE_DIR},
    code::{ConditionCode, TimeOfDay, Variation},
    table::IconTable,
};

const UNKNOWN_DESCRIPTION: &str = "Unknown";

/// Inputs for a single icon lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconRequest {
    pub code: ConditionCode,
    pub time_of_day: TimeOfDay,
    pub variation: Variation,
    pub enable_animation: bool,
    pub prefer_gif: bool,
}

impl IconRequest {
    pub fn new(code: impl Into<ConditionCode>, time_of_day: TimeOfDay) -> Self {
        Self {
            code: code.into(),
            time_of_day,
            variation: Variation::Fill,
            enable_animation: true,
            prefer_gif: true,
        }
    }

    /// Build a request from untrusted numeric fields of a weather payload.
    pub fn from_raw(code: Option<f64>, is_day: Option<f64>) -> Self {
        Self::new(ConditionCode::normalize(code), TimeOfDay::normalize(is_day))
    }

    pub fn variation(mut self, variation: Variation) -> Self {
        self.variation = variation;
        self
    }

    pub fn enable_animation(mut self, enable: bool) -> Self {
        self.enable_animation = enable;
        self
    }

    pub fn prefer_gif(mut self, prefer: bool) -> Self {
        self.prefer_gif = prefer;
        self
    }

    /// Vector-only lookup: no GIF override is consulted.
    pub fn static_only(self) -> Self {
        self.prefer_gif(false)
    }
}

/// Outcome of a lookup, ready to be used as an image source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedIcon {
    pub path: String,
    /// The global "not available" asset was used.
    pub is_default: bool,
    /// Raster loop from the GIF directory rather than a vector icon.
    pub is_gif: bool,
    pub description: String,
}

#[derive(Debug, Clone, Copy)]
pub struct IconResolver<'t> {
    table: &'t IconTable,
}

impl IconResolver<'static> {
    pub fn builtin() -> Self {
        Self { table: IconTable::builtin() }
    }
}

impl Default for IconResolver<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'t> IconResolver<'t> {
    pub fn new(table: &'t IconTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'t IconTable {
        self.table
    }

    /// Resolve a request to an asset path. Never fails; unknown or incomplete
    /// mappings degrade to the default asset.
    pub fn resolve(&self, request: &IconRequest) -> ResolvedIcon {
        let IconRequest { code, time_of_day, variation, enable_animation, prefer_gif } = *request;
        let description = self.describe(code, time_of_day);

        if prefer_gif && enable_animation {
            if let Some(gif) = self.table.gif(code) {
                return ResolvedIcon {
                    path: assets::join(GIF_BASE_DIR, gif),
                    is_default: false,
                    is_gif: true,
                    description,
                };
            }
        }

        let Some(mapping) = self.table.mapping(code) else {
            tracing::debug!(%code, %variation, "no icon mapping for condition code, using default");
            return default_icon(variation, description);
        };

        let filename = mapping
            .variant(time_of_day)
            .or_else(|| mapping.variant(time_of_day.opposite()))
            .or_else(|| mapping.fallback());

        match filename {
            Some(name) => ResolvedIcon {
                path: assets::join(variation.base_dir(), name),
                is_default: false,
                is_gif: false,
                description,
            },
            None => {
                tracing::debug!(%code, %variation, "icon mapping has no usable filename, using default");
                default_icon(variation, description)
            }
        }
    }

    pub fn resolve_path(&self, request: &IconRequest) -> String {
        self.resolve(request).path
    }

    pub fn supports_animation(&self, code: ConditionCode) -> bool {
        self.table.mapping(code).is_some_and(|m| m.animated)
    }

    /// Every code with a mapping, sorted ascending.
    pub fn list_known_codes(&self) -> Vec<ConditionCode> {
        let mut codes: Vec<_> = self.table.codes().collect();
        codes.sort_unstable();
        codes
    }

    pub fn describe(&self, code: ConditionCode, time_of_day: TimeOfDay) -> String {
        self.table.description(code, time_of_day).unwrap_or(UNKNOWN_DESCRIPTION).to_string()
    }
}

fn default_icon(variation: Variation, description: String) -> ResolvedIcon {
    ResolvedIcon {
        path: assets::join(variation.base_dir(), DEFAULT_ICON),
        is_default: true,
        is_gif: false,
        description,
    }
}

/// Resolve against the built-in table.
pub fn resolve(
    code: impl Into<ConditionCode>,
    time_of_day: TimeOfDay,
    variation: Variation,
    enable_animation: bool,
    prefer_gif: bool,
) -> ResolvedIcon {
    let request = IconRequest::new(code, time_of_day)
        .variation(variation)
        .enable_animation(enable_animation)
        .prefer_gif(prefer_gif);

    IconResolver::builtin().resolve(&request)
}

pub fn supports_animation(code: impl Into<ConditionCode>) -> bool {
    IconResolver::builtin().supports_animation(code.into())
}

pub fn list_known_codes() -> Vec<ConditionCode> {
    IconResolver::builtin().list_known_codes()
}
