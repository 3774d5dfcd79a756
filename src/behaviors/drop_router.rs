//! Drop-target routing.
//!
//! Classifies a drag-and-drop context by its source view and panel and
//! routes the dropped item to the matching handler operation. The router
//! returns whether the host's own default drop handling should still run:
//! only drops originating from the target component itself pass through.

/// Source panels of the device control tree that produce member drops.
const PANEL_ATTRIBUTES: &str = "attrs";
const PANEL_COMMANDS: &str = "commands";
const PANEL_PIPES: &str = "pipes";

const VIEW_DEVICE_TREE_LIST: &str = "device_tree_list";
const VIEW_DEVICES_TREE: &str = "devices_tree";

/// The item being dropped, as described by the source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropItem {
    pub id: String,
    /// Set when the devices-tree entry is a device alias.
    pub is_alias: bool,
    /// Set when the devices-tree entry is a device member.
    pub is_member: bool,
    pub device_name: Option<String>,
    pub host: Option<String>,
}

impl DropItem {
    pub fn member(id: &str) -> Self {
        DropItem {
            id: id.to_string(),
            is_alias: false,
            is_member: false,
            device_name: None,
            host: None,
        }
    }

    pub fn device(id: &str, host: &str, device_name: &str) -> Self {
        DropItem {
            id: id.to_string(),
            is_alias: false,
            is_member: true,
            device_name: Some(device_name.to_string()),
            host: Some(host.to_string()),
        }
    }
}

/// Where a drop came from and what it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropContext {
    /// True when the drag started on the drop target itself.
    pub from_self: bool,
    pub source_view: String,
    pub source_panel: String,
    pub item: DropItem,
}

/// Receiver for routed drops.
pub trait DropHandler {
    fn add_device(&mut self, id: &str);
    fn add_attribute(&mut self, id: &str);
    fn add_command(&mut self, id: &str);
    fn add_pipe(&mut self, id: &str);
    /// Called when the source is not supported by this widget.
    fn notify_unsupported(&mut self, source: &str);
}

/// Routes drop contexts to a [`DropHandler`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DropTargetRouter;

impl DropTargetRouter {
    pub fn new() -> Self {
        DropTargetRouter
    }

    /// Route one drop. Returns whether the host's default drop handling
    /// should proceed.
    pub fn route(&self, context: &DropContext, handler: &mut dyn DropHandler) -> bool {
        if context.from_self {
            return true;
        }
        match (context.source_view.as_str(), context.source_panel.as_str()) {
            (VIEW_DEVICE_TREE_LIST, PANEL_ATTRIBUTES) => handler.add_attribute(&context.item.id),
            (VIEW_DEVICE_TREE_LIST, PANEL_COMMANDS) => handler.add_command(&context.item.id),
            (VIEW_DEVICE_TREE_LIST, PANEL_PIPES) => handler.add_pipe(&context.item.id),
            (VIEW_DEVICES_TREE, _) if context.item.is_alias || context.item.is_member => {
                let id = device_id(&context.item);
                handler.add_device(&id);
            }
            _ => handler.notify_unsupported(&context.source_panel),
        }
        false
    }
}

/// Full device id: `host/device_name` when both are known, the raw item id
/// otherwise.
fn device_id(item: &DropItem) -> String {
    match (&item.host, &item.device_name) {
        (Some(host), Some(name)) => format!("{}/{}", host, name),
        _ => item.id.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        devices: Vec<String>,
        attributes: Vec<String>,
        commands: Vec<String>,
        pipes: Vec<String>,
        unsupported: Vec<String>,
    }

    impl DropHandler for Recorder {
        fn add_device(&mut self, id: &str) {
            self.devices.push(id.to_string());
        }
        fn add_attribute(&mut self, id: &str) {
            self.attributes.push(id.to_string());
        }
        fn add_command(&mut self, id: &str) {
            self.commands.push(id.to_string());
        }
        fn add_pipe(&mut self, id: &str) {
            self.pipes.push(id.to_string());
        }
        fn notify_unsupported(&mut self, source: &str) {
            self.unsupported.push(source.to_string());
        }
    }

    fn context(view: &str, panel: &str, item: DropItem) -> DropContext {
        DropContext {
            from_self: false,
            source_view: view.to_string(),
            source_panel: panel.to_string(),
            item,
        }
    }

    #[test]
    fn test_member_panels_route_to_matching_adder() {
        let router = DropTargetRouter::new();
        let mut handler = Recorder::default();

        router.route(
            &context("device_tree_list", "attrs", DropItem::member("a/b/c/temp")),
            &mut handler,
        );
        router.route(
            &context("device_tree_list", "commands", DropItem::member("a/b/c/on")),
            &mut handler,
        );
        router.route(
            &context("device_tree_list", "pipes", DropItem::member("a/b/c/p")),
            &mut handler,
        );

        assert_eq!(handler.attributes, vec!["a/b/c/temp"]);
        assert_eq!(handler.commands, vec!["a/b/c/on"]);
        assert_eq!(handler.pipes, vec!["a/b/c/p"]);
    }

    #[test]
    fn test_devices_tree_routes_device_with_host() {
        let router = DropTargetRouter::new();
        let mut handler = Recorder::default();
        let item = DropItem::device("42", "localhost:10000", "sys/tg_test/1");

        let proceed = router.route(&context("devices_tree", "", item), &mut handler);
        assert!(!proceed);
        assert_eq!(handler.devices, vec!["localhost:10000/sys/tg_test/1"]);
    }

    #[test]
    fn test_unsupported_source_notifies() {
        let router = DropTargetRouter::new();
        let mut handler = Recorder::default();

        router.route(
            &context("random_grid", "stuff", DropItem::member("x")),
            &mut handler,
        );
        assert_eq!(handler.unsupported, vec!["stuff"]);
        assert!(handler.devices.is_empty());
    }

    #[test]
    fn test_drop_from_self_passes_through() {
        let router = DropTargetRouter::new();
        let mut handler = Recorder::default();
        let mut ctx = context("device_tree_list", "attrs", DropItem::member("x"));
        ctx.from_self = true;

        assert!(router.route(&ctx, &mut handler));
        assert!(handler.attributes.is_empty());
    }
}
