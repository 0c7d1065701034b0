use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::fill::{Cause, FieldDecl, Kind, Record, Result, Slot, Tags, Value};

/// Record layout described at runtime, typically loaded from JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Schema {
	/// Record type label.
	pub name: String,
	/// Fields in declaration order.
	pub fields: Vec<SchemaField>,
}

/// One field of a [`Schema`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaField {
	/// Field identifier.
	pub name: String,
	/// Kind expression, see [`Kind::parse`].
	pub kind: String,
	/// Source tag key to lookup key.
	#[serde(default)]
	pub tags: BTreeMap<String, String>,
}

impl Schema {
	/// Parse a JSON schema document.
	pub fn from_json(text: &str) -> Result<Self> {
		Ok(serde_json::from_str(text)?)
	}

	/// Read and parse a JSON schema file.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let text = fs::read_to_string(path)?;
		Self::from_json(&text)
	}
}

/// Record whose fields are defined by a [`Schema`] and hold decoded [`Value`]s.
#[derive(Debug, Clone)]
pub struct DynamicRecord {
	name: String,
	fields: Vec<DynamicField>,
}

/// One field of a [`DynamicRecord`].
#[derive(Debug, Clone)]
pub struct DynamicField {
	/// Field identifier.
	pub name: String,
	/// Parsed kind.
	pub kind: Kind,
	/// Tag metadata.
	pub tags: Tags,
	/// Decoded value, `None` until a source sets it.
	pub value: Option<Value>,
}

impl DynamicRecord {
	/// Build an empty record from `schema`, validating every kind expression.
	pub fn new(schema: &Schema) -> Result<Self> {
		let fields = schema
			.fields
			.iter()
			.map(|field| -> Result<DynamicField> {
				Ok(DynamicField {
					name: field.name.clone(),
					kind: Kind::parse(&field.kind)?,
					tags: Tags::from_pairs(field.tags.iter().map(|(key, value)| (key.as_str(), value.as_str()))),
					value: None,
				})
			})
			.collect::<Result<Vec<_>>>()?;

		Ok(Self {
			name: schema.name.clone(),
			fields,
		})
	}

	/// Fields in declaration order.
	pub fn fields(&self) -> &[DynamicField] {
		&self.fields
	}

	/// Decoded value of the field called `name`.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.fields.iter().find(|field| field.name == name).and_then(|field| field.value.as_ref())
	}

	/// JSON object of all fields; unset fields are `null`.
	pub fn to_json(&self) -> serde_json::Value {
		let map = self
			.fields
			.iter()
			.map(|field| {
				let value = field.value.as_ref().map_or(serde_json::Value::Null, Value::to_json);
				(field.name.clone(), value)
			})
			.collect();
		serde_json::Value::Object(map)
	}
}

impl Record for DynamicRecord {
	fn type_name(&self) -> &str {
		&self.name
	}

	fn describe(&self) -> Vec<FieldDecl> {
		self.fields
			.iter()
			.map(|field| FieldDecl::new(field.name.as_str(), field.kind.clone(), field.tags.clone()))
			.collect()
	}

	fn slot(&mut self, index: usize) -> Option<&mut dyn Slot> {
		self.fields.get_mut(index).map(|field| field as &mut dyn Slot)
	}
}

impl Slot for DynamicField {
	fn kind(&self) -> Kind {
		self.kind.clone()
	}

	fn set(&mut self, value: Value) -> std::result::Result<(), Cause> {
		self.value = Some(value);
		Ok(())
	}
}

#[cfg(test)]
mod tests;
