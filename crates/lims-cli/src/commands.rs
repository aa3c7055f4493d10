//! Command implementations.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use serde_json::Value;
use tracing::info;

use lims_forms::{EditorRegistry, Validator, build_form_schema};
use lims_model::{
    EditabilityTag, FieldSchema, UiResource, VisibilityTag, VocabularyRegistry, VocabularyTerm,
};
use lims_nav::{decode, encode};
use lims_resources::{ResourceRegistry, compose_fixture, default_fixture};

use crate::cli::{DecodeArgs, EncodeArgs, SchemaArgs, SnapshotArgs, VocabArgs};

pub fn run_decode(args: &DecodeArgs) -> Result<()> {
    let stack = decode(&args.path);
    println!("{}", serde_json::to_string_pretty(stack.segments())?);
    Ok(())
}

pub fn run_encode(args: &EncodeArgs) -> Result<()> {
    let stack = lims_model::NavigationStack::new(args.segments.clone());
    println!("{}", encode(&stack));
    Ok(())
}

pub fn run_resources(args: &SnapshotArgs) -> Result<()> {
    let registry = composed_registry(args.server_schema.as_deref())?;
    let mut table = new_table(vec!["Key", "Title", "API Resource", "Route", "Fields"]);
    for resource in registry.values() {
        table.add_row(vec![
            resource.key.clone(),
            resource.display_title().to_string(),
            if resource.is_virtual() {
                format!("{} (virtual)", resource.api_resource)
            } else {
                resource.api_resource.clone()
            },
            resource.route.clone().unwrap_or_default(),
            resource.schema.fields.len().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_schema(args: &SchemaArgs) -> Result<()> {
    let resource = lookup_resource(args)?;
    let mut table = new_table(vec![
        "Ordinal",
        "Key",
        "Title",
        "Type",
        "Visibility",
        "Editability",
        "Required",
    ]);
    let mut fields: Vec<&FieldSchema> = resource.schema.fields.values().collect();
    fields.sort_by_key(|field| field.ordinal);
    for field in fields {
        table.add_row(vec![
            field.ordinal.to_string(),
            field.key.clone(),
            field.display_title().to_string(),
            field.data_type.to_string(),
            visibility_flags(&field.visibility),
            editability_flags(&field.editability),
            if field.required { "yes" } else { "" }.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_form(args: &SchemaArgs) -> Result<()> {
    let resource = lookup_resource(args)?;
    let vocabularies = args
        .vocabularies
        .as_deref()
        .map(load_vocabularies)
        .transpose()?;

    let form = build_form_schema(
        &resource.schema,
        None,
        vocabularies.as_ref(),
        &EditorRegistry::default(),
    );
    let mut table = new_table(vec!["Field", "Editor", "Required", "Choices", "Validators"]);
    for field in &form.fields {
        let choices = field
            .choices
            .iter()
            .map(|(key, _)| key.as_str())
            .collect::<Vec<&str>>()
            .join(", ");
        let validators = field
            .validators
            .iter()
            .map(describe_validator)
            .collect::<Vec<String>>()
            .join("; ");
        table.add_row(vec![
            field.key.clone(),
            field.editor.to_string(),
            if field.required { "yes" } else { "" }.to_string(),
            choices,
            validators,
        ]);
    }
    println!("{table}");
    for diagnostic in &form.diagnostics {
        eprintln!("warning: {}: {}", diagnostic.field, diagnostic.message);
    }
    Ok(())
}

pub fn run_vocab(args: &VocabArgs) -> Result<()> {
    let registry = load_vocabularies(&args.vocabularies)?;
    let terms = registry
        .get(&args.scope)
        .with_context(|| format!("look up scope {:?}", args.scope))?;
    let mut table = new_table(vec!["Key", "Title", "Ordinal", "Retired"]);
    let mut ordered: Vec<&VocabularyTerm> = terms.values().collect();
    ordered.sort_by_key(|term| (term.ordinal, term.key.clone()));
    for term in ordered {
        table.add_row(vec![
            term.key.clone(),
            term.title.clone(),
            term.ordinal.to_string(),
            if term.is_retired { "yes" } else { "" }.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn lookup_resource(args: &SchemaArgs) -> Result<UiResource> {
    let registry = composed_registry(args.server_schema.as_deref())?;
    registry
        .get(&args.resource)
        .cloned()
        .with_context(|| format!("unknown resource {:?}", args.resource))
}

fn composed_registry(server_schema: Option<&Path>) -> Result<ResourceRegistry> {
    let server = match server_schema {
        Some(path) => load_server_snapshot(path)?,
        None => Vec::new(),
    };
    let registry = compose_fixture(&default_fixture(), &server);
    info!(resources = registry.len(), "composed registry");
    Ok(registry)
}

/// A server snapshot is a resource listing: either a bare JSON array or an
/// `objects`-wrapped one.
fn load_server_snapshot(path: &Path) -> Result<Vec<UiResource>> {
    let objects = load_objects(path)?;
    let mut resources = Vec::new();
    for value in objects {
        let resource: UiResource = serde_json::from_value(value)
            .with_context(|| format!("parse resource entry in {}", path.display()))?;
        resources.push(resource);
    }
    Ok(resources)
}

fn load_vocabularies(path: &Path) -> Result<VocabularyRegistry> {
    let objects = load_objects(path)?;
    let mut terms = Vec::new();
    for value in objects {
        let term: VocabularyTerm = serde_json::from_value(value)
            .with_context(|| format!("parse vocabulary entry in {}", path.display()))?;
        terms.push(term);
    }
    Ok(VocabularyRegistry::from_terms(terms))
}

fn load_objects(path: &Path) -> Result<Vec<Value>> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value: Value =
        serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))?;
    Ok(match value {
        Value::Array(objects) => objects,
        Value::Object(mut map) => match map.remove("objects") {
            Some(Value::Array(objects)) => objects,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    })
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn visibility_flags(tags: &BTreeSet<VisibilityTag>) -> String {
    let mut flags = String::new();
    for (tag, flag) in [
        (VisibilityTag::List, 'l'),
        (VisibilityTag::Detail, 'd'),
        (VisibilityTag::Edit, 'e'),
    ] {
        if tags.contains(&tag) {
            flags.push(flag);
        }
    }
    flags
}

fn editability_flags(tags: &BTreeSet<EditabilityTag>) -> String {
    let mut flags = String::new();
    for (tag, flag) in [(EditabilityTag::Create, 'c'), (EditabilityTag::Update, 'u')] {
        if tags.contains(&tag) {
            flags.push(flag);
        }
    }
    flags
}

fn describe_validator(validator: &Validator) -> String {
    match validator {
        Validator::Required => "required".to_string(),
        Validator::Min(min) => format!("min {}", min),
        Validator::Range(bounds) => format!("ranges {:?}", bounds),
        Validator::Pattern { regex, .. } => format!("pattern {}", regex.as_str()),
    }
}
