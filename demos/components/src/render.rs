use serde::{Deserialize, Serialize};
use spark_component::EntityId;
use spark_event::{Event, RenderData};
use spark_world::Component;

/// How an entity looks: a map glyph plus a name and description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderComponent {
    pub symbol: char,
    pub name: String,
    pub description: String,
}

impl RenderComponent {
    #[must_use]
    pub fn new(symbol: char, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            symbol,
            name: name.into(),
            description: description.into(),
        }
    }
}

impl Component for RenderComponent {
    fn handle_event(&mut self, _owner: EntityId, event: &mut Event) {
        if let Some(render) = event.render_data_mut() {
            *render = RenderData {
                symbol: self.symbol,
                name: self.name.clone(),
                description: self.description.clone(),
            };
        }
    }
}
