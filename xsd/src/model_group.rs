use super::{
    annotation::Annotation, element_decl::ElementDeclaration, error::XsdError,
    particle::{Occurs, Particle}, xstypes::Sequence,
};
use roxmltree::Node;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Compositor {
    All,
    Choice,
    Sequence,
}

/// A `<sequence>`, `<choice>` or `<all>` with its particles in document order.
#[derive(Clone, Debug)]
pub struct ModelGroup {
    pub annotation: Option<Annotation>,
    pub compositor: Compositor,
    pub occurs: Occurs,
    pub particles: Sequence<Particle>,
}

impl ModelGroup {
    pub(super) fn map_from_xml(group: Node) -> Result<Self, XsdError> {
        let compositor = match group.tag_name().name() {
            "all" => Compositor::All,
            "choice" => Compositor::Choice,
            _ => Compositor::Sequence,
        };
        let mut particles = Sequence::new();
        for child in group.children().filter(|c| c.is_element()) {
            if let Some(particle) = Particle::map_from_xml(child)? {
                particles.push(particle);
            }
        }
        Ok(Self {
            annotation: Annotation::of(group),
            compositor,
            occurs: Occurs::from_xml(group)?,
            particles,
        })
    }

    /// The first model group child of `node`, if any.
    pub(super) fn first_in(node: Node) -> Result<Option<Self>, XsdError> {
        node.children()
            .find(|c| c.is_element() && ["all", "choice", "sequence"].contains(&c.tag_name().name()))
            .map(Self::map_from_xml)
            .transpose()
    }

    /// All local element declarations of this group, nested groups flattened, in document order.
    /// Group references are not followed.
    pub fn elements(&self) -> Vec<&ElementDeclaration> {
        let mut elements = Vec::new();
        for particle in &self.particles {
            match particle {
                Particle::Element(e) => elements.push(e),
                Particle::ModelGroup(g) => elements.extend(g.elements()),
                Particle::Group(g) => {
                    if let Some(content) = g.content.as_ref() {
                        elements.extend(content.elements());
                    }
                }
                Particle::Any { .. } => {}
            }
        }
        elements
    }
}
