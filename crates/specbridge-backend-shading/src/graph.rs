//! In-memory shader node tree.
//!
//! Nodes carry typed input sockets with default values and named outputs.
//! A link connects one node output to one node input; an input holds at
//! most one incoming link.

use tracing::trace;

use crate::error::ShadingError;

/// Index of a node in its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// A named socket on a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SocketRef {
    pub node: NodeId,
    pub socket: String,
}

impl SocketRef {
    pub fn new(node: NodeId, socket: impl Into<String>) -> Self {
        Self {
            node,
            socket: socket.into(),
        }
    }
}

/// Texture lookup interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    #[default]
    Linear,
    Closest,
}

/// How texture coordinates outside [0, 1] are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extension {
    #[default]
    Repeat,
    Extend,
    Mirror,
}

/// What a node does, with its node-level properties.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    PrincipledBsdf,
    ImageTexture {
        image: String,
        interpolation: Interpolation,
        extension: Extension,
    },
    UvMap {
        uv_map: String,
    },
    Mapping {
        translation: [f64; 2],
        rotation: f64,
        scale: [f64; 2],
    },
}

impl NodeKind {
    fn default_inputs(&self) -> Vec<InputSocket> {
        match self {
            NodeKind::PrincipledBsdf => vec![
                InputSocket::color("Base Color", [0.8, 0.8, 0.8, 1.0]),
                InputSocket::float("Metallic", 0.0),
                InputSocket::float("Roughness", 0.5),
                InputSocket::float("IOR", 1.45),
                InputSocket::float("Transmission", 0.0),
                InputSocket::float("Specular", 0.5),
                InputSocket::float("Specular Tint", 0.0),
                InputSocket::float("Alpha", 1.0),
            ],
            NodeKind::ImageTexture { .. } | NodeKind::Mapping { .. } => {
                vec![InputSocket::vector("Vector", [0.0; 3])]
            }
            NodeKind::UvMap { .. } => Vec::new(),
        }
    }

    fn outputs(&self) -> &'static [&'static str] {
        match self {
            NodeKind::PrincipledBsdf => &["BSDF"],
            NodeKind::ImageTexture { .. } => &["Color", "Alpha"],
            NodeKind::UvMap { .. } => &["UV"],
            NodeKind::Mapping { .. } => &["Vector"],
        }
    }
}

/// Default value of an unlinked input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SocketValue {
    Float(f64),
    Color([f64; 4]),
    Vector([f64; 3]),
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputSocket {
    pub name: String,
    pub default_value: SocketValue,
}

impl InputSocket {
    pub fn float(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            default_value: SocketValue::Float(value),
        }
    }

    pub fn color(name: &str, value: [f64; 4]) -> Self {
        Self {
            name: name.to_string(),
            default_value: SocketValue::Color(value),
        }
    }

    pub fn vector(name: &str, value: [f64; 3]) -> Self {
        Self {
            name: name.to_string(),
            default_value: SocketValue::Vector(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub label: Option<String>,
    /// Editor position, x to the right and y up.
    pub location: [f64; 2],
    pub inputs: Vec<InputSocket>,
}

impl Node {
    pub fn input(&self, name: &str) -> Option<&InputSocket> {
        self.inputs.iter().find(|s| s.name == name)
    }

    pub fn has_output(&self, name: &str) -> bool {
        self.kind.outputs().contains(&name)
    }
}

/// Output socket `from` feeding input socket `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub from: SocketRef,
    pub to: SocketRef,
}

#[derive(Debug, Clone, Default)]
pub struct NodeTree {
    nodes: Vec<Node>,
    links: Vec<Link>,
}

impl NodeTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with its default sockets.
    pub fn add_node(&mut self, kind: NodeKind, location: [f64; 2]) -> NodeId {
        let id = NodeId(self.nodes.len());
        let inputs = kind.default_inputs();
        trace!(node = id.0, kind = ?kind, "adding node");
        self.nodes.push(Node {
            id,
            kind,
            label: None,
            location,
            inputs,
        });
        id
    }

    pub fn set_label(&mut self, id: NodeId, label: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.label = Some(label.into());
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn input(&self, socket: &SocketRef) -> Option<&InputSocket> {
        self.node(socket.node)?.input(&socket.socket)
    }

    pub fn has_input(&self, socket: &SocketRef) -> bool {
        self.input(socket).is_some()
    }

    /// Default value of a float input.
    pub fn float_input(&self, socket: &SocketRef) -> Option<f64> {
        match self.input(socket)?.default_value {
            SocketValue::Float(v) => Some(v),
            _ => None,
        }
    }

    /// Set the default value of a float input.
    ///
    /// Fails with `UnknownSocket` when the socket does not exist or is not a
    /// float socket.
    pub fn set_float(&mut self, socket: &SocketRef, value: f64) -> Result<(), ShadingError> {
        let slot = self
            .nodes
            .get_mut(socket.node.0)
            .and_then(|node| node.inputs.iter_mut().find(|s| s.name == socket.socket))
            .and_then(|input| match &mut input.default_value {
                SocketValue::Float(v) => Some(v),
                _ => None,
            })
            .ok_or_else(|| ShadingError::unknown_socket(socket.node.0, &socket.socket))?;
        *slot = value;
        Ok(())
    }

    /// Link `from_node.output` into `to`, replacing any existing link into
    /// that input.
    pub fn link(
        &mut self,
        from_node: NodeId,
        output: &str,
        to: &SocketRef,
    ) -> Result<(), ShadingError> {
        let has_output = self.node(from_node).map_or(false, |n| n.has_output(output));
        if !has_output {
            return Err(ShadingError::unknown_socket(from_node.0, output));
        }
        if !self.has_input(to) {
            return Err(ShadingError::unknown_socket(to.node.0, &to.socket));
        }

        self.links.retain(|l| l.to != *to);
        self.links.push(Link {
            from: SocketRef::new(from_node, output),
            to: to.clone(),
        });
        Ok(())
    }

    /// The link feeding an input, if any.
    pub fn incoming(&self, to: &SocketRef) -> Option<&Link> {
        self.links.iter().find(|l| l.to == *to)
    }
}
