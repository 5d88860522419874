//! Conversions between Terraform attribute values and NetBox API values

use crate::error::ProviderError;
use crate::data::TAG_ATTR;
use netbox_client::NestedTag;
use serde_json::{json, Value};

/// Read the `tag` set (`[{name, slug}]`) into request tags
pub fn tags_from_attribute(value: Option<&Value>) -> Result<Vec<NestedTag>, ProviderError> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };
    let items = value
        .as_array()
        .ok_or_else(|| ProviderError::invalid_attribute(TAG_ATTR, "expected a set of {name, slug}"))?;
    let mut tags = items
        .iter()
        .map(|item| {
            let name = item.get("name").and_then(Value::as_str).unwrap_or_default();
            let slug = item.get("slug").and_then(Value::as_str).unwrap_or_default();
            if slug.is_empty() {
                return Err(ProviderError::invalid_attribute(TAG_ATTR, "every tag needs a slug"));
            }
            Ok(NestedTag {
                id: None,
                name: name.to_string(),
                slug: slug.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    tags.sort();
    tags.dedup();
    Ok(tags)
}

/// Render tags returned by NetBox as the `tag` set
pub fn tags_to_attribute(tags: &[NestedTag]) -> Value {
    let mut items: Vec<(&str, &str)> = tags.iter().map(|tag| (tag.name.as_str(), tag.slug.as_str())).collect();
    items.sort();
    Value::Array(
        items
            .into_iter()
            .map(|(name, slug)| json!({"name": name, "slug": slug}))
            .collect(),
    )
}

/// Content type of the object behind an API URL.
///
/// `https://netbox/api/dcim/device-roles/3/` becomes `dcim.devicerole`.
pub fn content_type_from_url(url: &str) -> Option<String> {
    let path = url.split('?').next().unwrap_or(url);
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let api = segments.iter().rposition(|segment| *segment == "api")?;
    match &segments[api + 1..] {
        [app, model, ..] => Some(format!("{}.{}", app, singular(&model.replace('-', "")))),
        _ => None,
    }
}

fn singular(plural: &str) -> &str {
    if plural.ends_with("sses") || plural.ends_with("xes") {
        &plural[..plural.len() - 2]
    } else {
        plural.strip_suffix('s').unwrap_or(plural)
    }
}

/// Relation id as sent on create; `0` means unset
pub fn nonzero_id(id: u64) -> Option<u64> {
    (id != 0).then_some(id)
}

/// Parse an id recorded in state
pub fn parse_id(id: &str) -> Result<u64, ProviderError> {
    id.parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .ok_or_else(|| ProviderError::InvalidId(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_singularizes_model() {
        assert_eq!(
            content_type_from_url("https://netbox/api/dcim/device-roles/3/").as_deref(),
            Some("dcim.devicerole")
        );
        assert_eq!(
            content_type_from_url("http://nb/api/virtualization/virtual-machines/12/").as_deref(),
            Some("virtualization.virtualmachine")
        );
        assert_eq!(
            content_type_from_url("http://nb/api/ipam/ip-addresses/1/").as_deref(),
            Some("ipam.ipaddress")
        );
        assert_eq!(
            content_type_from_url("http://nb/api/dcim/mac-addresses/5/").as_deref(),
            Some("dcim.macaddress")
        );
        assert_eq!(
            content_type_from_url("http://nb/api/dcim/interfaces/5/").as_deref(),
            Some("dcim.interface")
        );
        assert_eq!(
            content_type_from_url("http://nb/api/ipam/prefixes/1/").as_deref(),
            Some("ipam.prefix")
        );
        assert_eq!(content_type_from_url("http://nb/api/"), None);
    }

    #[test]
    fn tags_are_sorted_and_deduplicated() {
        let value = json!([
            {"name": "Edge", "slug": "edge"},
            {"name": "Core", "slug": "core"},
            {"name": "Edge", "slug": "edge"}
        ]);
        let tags = tags_from_attribute(Some(&value)).unwrap();
        assert_eq!(tags.iter().map(|t| t.slug.as_str()).collect::<Vec<_>>(), vec!["core", "edge"]);
        assert!(tags.iter().all(|t| t.id.is_none()));
    }

    #[test]
    fn tags_without_slug_are_rejected() {
        let value = json!([{"name": "Edge"}]);
        assert!(tags_from_attribute(Some(&value)).is_err());
        assert!(tags_from_attribute(None).unwrap().is_empty());
    }

    #[test]
    fn api_tags_drop_ids() {
        let tags = vec![NestedTag {
            id: Some(9),
            name: "Edge".into(),
            slug: "edge".into(),
        }];
        assert_eq!(tags_to_attribute(&tags), json!([{"name": "Edge", "slug": "edge"}]));
    }

    #[test]
    fn ids() {
        assert_eq!(nonzero_id(0), None);
        assert_eq!(nonzero_id(3), Some(3));
        assert_eq!(parse_id("17").unwrap(), 17);
        assert!(parse_id("").is_err());
        assert!(parse_id("0").is_err());
        assert!(parse_id("abc").is_err());
    }
}
