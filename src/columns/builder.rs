//! Fluent construction of column descriptors.

use crate::domain::{
    Align, CellContext, CellRenderer, Column, ColumnWidth, FieldComponent, FieldRule, Fixed,
};
use serde_json::{Map, Value};

/// Chainable builder for [`Column`].
///
/// Every setter returns the same builder so calls can be chained; [`build`]
/// returns an independent snapshot, so the builder can keep being modified
/// afterwards without affecting columns already built. The builder performs no
/// validation.
///
/// [`build`]: ColumnBuilder::build
///
/// # Example
///
/// ```rust
/// use protable::columns::ColumnBuilder;
/// use protable::domain::Align;
/// use serde_json::json;
///
/// let column = ColumnBuilder::create()
///     .title("User ID")
///     .data_index("id")
///     .hide_in_search(true)
///     .width(100)
///     .align(Align::Center)
///     .build();
///
/// assert_eq!(
///     serde_json::to_value(&column)?,
///     json!({
///         "title": "User ID",
///         "dataIndex": "id",
///         "hideInSearch": true,
///         "width": 100,
///         "align": "center"
///     })
/// );
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ColumnBuilder {
    column: Column,
}

impl ColumnBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Same as [`ColumnBuilder::new`].
    #[must_use]
    pub fn create() -> Self {
        Self::new()
    }

    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.column.title = Some(title.into());
        self
    }

    pub fn data_index(&mut self, data_index: impl Into<String>) -> &mut Self {
        self.column.data_index = Some(data_index.into());
        self
    }

    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.column.name = Some(name.into());
        self
    }

    pub fn label(&mut self, label: impl Into<String>) -> &mut Self {
        self.column.label = Some(label.into());
        self
    }

    pub fn hide_in_search(&mut self, hide: bool) -> &mut Self {
        self.column.hide_in_search = Some(hide);
        self
    }

    pub fn hide_in_table(&mut self, hide: bool) -> &mut Self {
        self.column.hide_in_table = Some(hide);
        self
    }

    pub fn order(&mut self, order: f64) -> &mut Self {
        self.column.order = Some(order);
        self
    }

    pub fn value_type(&mut self, value_type: impl Into<String>) -> &mut Self {
        self.column.value_type = Some(value_type.into());
        self
    }

    pub fn component(&mut self, component: impl Into<FieldComponent>) -> &mut Self {
        self.column.component = Some(component.into());
        self
    }

    /// Sets the component together with its field properties.
    pub fn component_with_props(
        &mut self,
        component: impl Into<FieldComponent>,
        field_props: Map<String, Value>,
    ) -> &mut Self {
        self.column.component = Some(component.into());
        self.column.field_props = Some(field_props);
        self
    }

    pub fn default_value(&mut self, value: impl Into<Value>) -> &mut Self {
        self.column.default_value = Some(value.into());
        self
    }

    pub fn required(&mut self, required: bool) -> &mut Self {
        self.column.required = Some(required);
        self
    }

    pub fn rules(&mut self, rules: Vec<FieldRule>) -> &mut Self {
        self.column.rules = Some(rules);
        self
    }

    /// Sets `fieldProps.placeholder`, creating `fieldProps` if needed.
    pub fn placeholder(&mut self, placeholder: impl Into<String>) -> &mut Self {
        self.column
            .field_props
            .get_or_insert_with(Map::new)
            .insert("placeholder".to_string(), Value::String(placeholder.into()));
        self
    }

    pub fn custom_render(
        &mut self,
        render: impl Fn(&CellContext<'_>) -> String + Send + Sync + 'static,
    ) -> &mut Self {
        self.column.custom_render = Some(CellRenderer::new(render));
        self
    }

    pub fn width(&mut self, width: impl Into<ColumnWidth>) -> &mut Self {
        self.column.width = Some(width.into());
        self
    }

    pub fn align(&mut self, align: Align) -> &mut Self {
        self.column.align = Some(align);
        self
    }

    pub fn fixed(&mut self, fixed: Fixed) -> &mut Self {
        self.column.fixed = Some(fixed);
        self
    }

    /// Returns a snapshot of the fields set so far.
    #[must_use]
    pub fn build(&self) -> Column {
        self.column.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldKind;
    use serde_json::json;

    #[test]
    fn test_build_only_sets_given_fields() {
        let column = ColumnBuilder::new().title("T").data_index("d").build();
        assert_eq!(
            serde_json::to_value(&column).unwrap(),
            json!({ "title": "T", "dataIndex": "d" })
        );
    }

    #[test]
    fn test_builders_are_independent() {
        let mut first = ColumnBuilder::new();
        first.title("First");
        let mut second = ColumnBuilder::new();
        second.data_index("second");

        assert_eq!(first.build().data_index, None);
        assert_eq!(second.build().title, None);
    }

    #[test]
    fn test_build_returns_snapshot() {
        let mut builder = ColumnBuilder::new();
        let before = builder.title("Before").build();
        builder.title("After");

        assert_eq!(before.title.as_deref(), Some("Before"));
        assert_eq!(builder.build().title.as_deref(), Some("After"));
    }

    #[test]
    fn test_component_with_field_props() {
        let props = json!({ "placeholder": "Select status" }).as_object().cloned().unwrap();
        let column = ColumnBuilder::create()
            .title("Status")
            .data_index("status")
            .component_with_props(FieldKind::Select, props.clone())
            .build();

        assert_eq!(column.component, Some(FieldComponent::Builtin(FieldKind::Select)));
        assert_eq!(column.field_props, Some(props));
    }

    #[test]
    fn test_validation_rules() {
        let column = ColumnBuilder::create()
            .title("Email")
            .data_index("email")
            .required(true)
            .rules(vec![FieldRule::required("Email is required")])
            .build();

        assert_eq!(column.required, Some(true));
        assert_eq!(column.rules.map(|rules| rules.len()), Some(1));
    }

    #[test]
    fn test_placeholder_initializes_field_props() {
        let column = ColumnBuilder::new().placeholder("Search by name").build();
        assert_eq!(
            column.field_props.map(Value::Object),
            Some(json!({ "placeholder": "Search by name" }))
        );
    }

    #[test]
    fn test_custom_render_is_kept() {
        let column = ColumnBuilder::new()
            .data_index("name")
            .custom_render(|ctx| format!("Hello {}", ctx.text.as_str().unwrap_or_default()))
            .build();

        let record = json!({ "name": "John" }).as_object().cloned().unwrap();
        let rendered = column.custom_render.unwrap().render(&CellContext {
            record: &record,
            text: &record["name"],
            index: 0,
        });
        assert_eq!(rendered, "Hello John");
    }
}
