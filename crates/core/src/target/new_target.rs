//! Unsaved target input and partial updates.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};

use super::{OrbitalElements, Target, TargetType};

/// A target that has not been saved yet.
///
/// Deserializes from the JSON accepted by the HTTP API; every field except
/// `name` is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewTarget {
    pub name: String,
    pub target_type: TargetType,
    pub ra: Option<f64>,
    pub dec: Option<f64>,
    pub epoch: Option<f64>,
    pub pm_ra: Option<f64>,
    pub pm_dec: Option<f64>,
    pub parallax: Option<f64>,
    pub distance: Option<f64>,
    pub orbital_elements: Option<OrbitalElements>,
    pub extra: BTreeMap<String, serde_json::Value>,
    /// Aliases saved alongside the target.
    pub aliases: Vec<String>,
}

impl NewTarget {
    /// A sidereal target at `(ra, dec)` degrees.
    #[must_use]
    pub fn sidereal(name: impl Into<String>, ra: f64, dec: f64) -> Self {
        Self {
            name: name.into(),
            target_type: TargetType::Sidereal,
            ra: Some(ra),
            dec: Some(dec),
            ..Self::default()
        }
    }

    /// A non-sidereal target described by orbital elements.
    #[must_use]
    pub fn non_sidereal(name: impl Into<String>, elements: OrbitalElements) -> Self {
        Self {
            name: name.into(),
            target_type: TargetType::NonSidereal,
            orbital_elements: Some(elements),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    #[must_use]
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn epoch(mut self, epoch: f64) -> Self {
        self.epoch = Some(epoch);
        self
    }

    #[must_use]
    pub fn proper_motion(mut self, pm_ra: f64, pm_dec: f64) -> Self {
        self.pm_ra = Some(pm_ra);
        self.pm_dec = Some(pm_dec);
        self
    }

    #[must_use]
    pub fn parallax(mut self, parallax: f64) -> Self {
        self.parallax = Some(parallax);
        self
    }

    #[must_use]
    pub fn distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }
}

/// Partial update of an existing target.
///
/// `None` leaves a field untouched. `ra` and `dec` carry a second level:
/// `Some(None)` (a JSON `null`) clears the position, which is how a target
/// becomes non-sidereal. `extra` entries are merged key by key; a JSON
/// `null` value removes the key. Aliases are managed separately.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetUpdate {
    pub name: Option<String>,
    pub target_type: Option<TargetType>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub ra: Option<Option<f64>>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub dec: Option<Option<f64>>,
    pub epoch: Option<f64>,
    pub pm_ra: Option<f64>,
    pub pm_dec: Option<f64>,
    pub parallax: Option<f64>,
    pub distance: Option<f64>,
    pub orbital_elements: Option<OrbitalElements>,
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A field that appears in the input is `Some`, even when it is `null`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl TargetUpdate {
    /// Whether the update can change what the target matches against.
    #[must_use]
    pub fn touches_identity(&self) -> bool {
        self.name.is_some() || self.ra.is_some() || self.dec.is_some()
    }

    /// Returns `target` with this update applied and `modified` bumped.
    #[must_use]
    pub fn apply_to(&self, target: &Target) -> Target {
        let mut updated = target.clone();
        if let Some(name) = &self.name {
            updated.name.clone_from(name);
        }
        if let Some(target_type) = self.target_type {
            updated.target_type = target_type;
        }
        if let Some(ra) = self.ra {
            updated.ra = ra;
        }
        if let Some(dec) = self.dec {
            updated.dec = dec;
        }
        updated.epoch = self.epoch.or(updated.epoch);
        updated.pm_ra = self.pm_ra.or(updated.pm_ra);
        updated.pm_dec = self.pm_dec.or(updated.pm_dec);
        updated.parallax = self.parallax.or(updated.parallax);
        updated.distance = self.distance.or(updated.distance);
        if let Some(elements) = &self.orbital_elements {
            updated.orbital_elements = Some(elements.clone());
        }
        for (key, value) in &self.extra {
            if value.is_null() {
                updated.extra.remove(key);
            } else {
                updated.extra.insert(key.clone(), value.clone());
            }
        }
        updated.modified = Utc::now();
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::target;
    use super::*;

    #[test]
    fn deserializes_minimal_json() {
        let parsed: NewTarget =
            serde_json::from_str(r#"{"name": "M31", "ra": 10.68458, "dec": 41.26906}"#)
                .expect("valid json");
        assert_eq!(parsed, NewTarget::sidereal("M31", 10.68458, 41.26906));
    }

    #[test]
    fn deserializes_non_sidereal_json() {
        let parsed: NewTarget = serde_json::from_str(
            r#"{"name": "C/2020 F3", "target_type": "non_sidereal",
                "orbital_elements": {"scheme": "MPC_COMET", "eccentricity": 0.999}}"#,
        )
        .expect("valid json");
        assert_eq!(parsed.target_type, TargetType::NonSidereal);
        assert_eq!(parsed.orbital_elements.map(|e| e.scheme), Some("MPC_COMET".to_owned()));
    }

    #[test]
    fn builder_collects_aliases_and_extras() {
        let t = NewTarget::sidereal("SN2023abc", 1.0, 2.0)
            .alias("AT 2023abc")
            .alias("ZTF23aaaaaaa")
            .extra("redshift", 0.012)
            .extra("classified", true);
        assert_eq!(t.aliases, vec!["AT 2023abc", "ZTF23aaaaaaa"]);
        assert_eq!(t.extra.get("redshift"), Some(&serde_json::json!(0.012)));
        assert_eq!(t.extra.get("classified"), Some(&serde_json::json!(true)));
    }

    #[test]
    fn extra_only_update_does_not_touch_identity() {
        let update = TargetUpdate {
            extra: BTreeMap::from([("mag".to_owned(), serde_json::json!(17.2))]),
            ..TargetUpdate::default()
        };
        assert!(!update.touches_identity());
        let moved = TargetUpdate { ra: Some(Some(1.0)), ..TargetUpdate::default() };
        assert!(moved.touches_identity());
        let cleared = TargetUpdate { dec: Some(None), ..TargetUpdate::default() };
        assert!(cleared.touches_identity());
    }

    #[test]
    fn apply_merges_extras_and_removes_nulls() {
        let mut original = target(1, "M31", Some((10.0, 41.0)));
        original.extra.insert("mag".to_owned(), serde_json::json!(3.4));
        original.extra.insert("stale".to_owned(), serde_json::json!("x"));

        let update = TargetUpdate {
            dec: Some(Some(41.5)),
            extra: BTreeMap::from([
                ("stale".to_owned(), serde_json::Value::Null),
                ("type".to_owned(), serde_json::json!("galaxy")),
            ]),
            ..TargetUpdate::default()
        };
        let updated = update.apply_to(&original);

        assert_eq!(updated.name, "M31");
        assert_eq!(updated.ra, Some(10.0));
        assert_eq!(updated.dec, Some(41.5));
        assert_eq!(updated.extra.get("mag"), Some(&serde_json::json!(3.4)));
        assert!(!updated.extra.contains_key("stale"));
        assert_eq!(updated.extra.get("type"), Some(&serde_json::json!("galaxy")));
        assert!(updated.modified >= original.modified);
    }

    #[test]
    fn null_position_clears_and_absent_position_keeps() {
        let clear: TargetUpdate =
            serde_json::from_str(r#"{"target_type": "non_sidereal", "ra": null, "dec": null}"#)
                .expect("valid json");
        assert_eq!(clear.ra, Some(None));
        assert_eq!(clear.dec, Some(None));

        let original = target(1, "M31", Some((10.0, 41.0)));
        let cleared = clear.apply_to(&original);
        assert_eq!(cleared.target_type, TargetType::NonSidereal);
        assert_eq!((cleared.ra, cleared.dec), (None, None));

        let keep: TargetUpdate = serde_json::from_str(r#"{"name": "Andromeda"}"#).expect("valid json");
        assert_eq!((keep.ra, keep.dec), (None, None));
        let kept = keep.apply_to(&original);
        assert_eq!((kept.ra, kept.dec), (Some(10.0), Some(41.0)));
    }
}
