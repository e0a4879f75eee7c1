//! Retained host elements and the reconciler for [`BlackBox`] components.
//!
//! `BlackBoxHost<T>` keeps one `(instance, element)` pair per key. Each render
//! pass is bracketed by `begin_pass`/`end_pass`; keys not attached in between
//! are unmounted.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use log::debug;
use ratatui::layout::Rect;

use crate::tui::component::{BlackBox, Lifecycle};

/// Description of the element a black box wants: a tag, an id, and its
/// textual content (editor text, preview document).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub tag: &'static str,
    pub id: String,
    pub content: String,
}

impl Node {
    pub fn new(tag: &'static str, id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tag,
            id: id.into(),
            content: content.into(),
        }
    }
}

/// The live element behind a black box.
#[derive(Debug, Default)]
pub struct Element {
    pub key: String,
    pub node: Node,
    /// Area assigned by the latest layout pass.
    pub area: Rect,
    /// Bumped whenever the element is rebuilt from a fresh node.
    pub generation: u32,
}

pub type ElementRef = Rc<RefCell<Element>>;

impl Element {
    pub fn new(key: impl Into<String>, node: Node) -> Self {
        Self {
            key: key.into(),
            node,
            area: Rect::default(),
            generation: 0,
        }
    }

    pub fn new_ref(key: impl Into<String>, node: Node) -> ElementRef {
        Rc::new(RefCell::new(Self::new(key, node)))
    }

    pub fn client_height(&self) -> u16 {
        self.area.height
    }

    pub fn content(&self) -> &str {
        &self.node.content
    }

    /// Swaps the content in place, keeping the element.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.node.content = content.into();
    }

    /// Throws the element's state away and recreates it from `node`.
    pub fn rebuild(&mut self, node: Node) {
        self.node = node;
        self.generation += 1;
    }
}

struct Mounted<T> {
    instance: T,
    element: ElementRef,
}

pub struct BlackBoxHost<T> {
    mounted: HashMap<String, Mounted<T>>,
    attached: HashSet<String>,
}

impl<T> Default for BlackBoxHost<T> {
    fn default() -> Self {
        Self {
            mounted: HashMap::new(),
            attached: HashSet::new(),
        }
    }
}

impl<T: BlackBox> BlackBoxHost<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_pass(&mut self) {
        self.attached.clear();
    }

    /// Places `instance` at `area`, mounting or updating as appropriate, and
    /// returns its element.
    pub fn attach(&mut self, mut instance: T, area: Rect, cx: &mut Lifecycle<'_>) -> ElementRef {
        let key = instance.key();
        self.attached.insert(key.clone());

        let element = match self.mounted.remove(&key) {
            Some(Mounted {
                instance: mut previous,
                element,
            }) => {
                element.borrow_mut().area = area;
                instance.update(&mut previous, &element, cx);
                element
            }
            None => {
                debug!("Mounting black box {}", key);
                let element = Element::new_ref(key.clone(), instance.node());
                element.borrow_mut().area = area;
                instance.mount(&element, cx);
                element
            }
        };

        self.mounted.insert(
            key,
            Mounted {
                instance,
                element: element.clone(),
            },
        );
        element
    }

    /// Drops every key that wasn't attached since `begin_pass`.
    pub fn end_pass(&mut self) {
        let attached = &self.attached;
        self.mounted.retain(|key, _| {
            let keep = attached.contains(key);
            if !keep {
                debug!("Unmounting black box {}", key);
            }
            keep
        });
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.mounted.get(key).map(|m| &m.instance)
    }

    pub fn element(&self, key: &str) -> Option<ElementRef> {
        self.mounted.get(key).map(|m| m.element.clone())
    }

    pub fn is_mounted(&self, key: &str) -> bool {
        self.mounted.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.mounted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty()
    }
}
