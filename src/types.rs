/// Unique record identifier (stable within a source).
/// Example: `stations::KORD`
pub type RecordId = String;
/// Identifier for the source/layer that produced a record.
/// Examples: `stations`, `buoys`
pub type SourceId = String;
/// Attribute name inside a record's attribute map.
/// Examples: `WIND_SPEED`, `STATION_NAME`
pub type FieldName = String;
/// Categorical attribute value in display form.
/// Examples: `5`, `20`, `calm`
pub type CategoryValue = String;
