//! The per-kind translator table.
//!
//! `translator_for` is an exhaustive match: adding an `AxiomKind` without a
//! translator does not compile.

use std::collections::BTreeSet;

use ontmap_graph::vocab::{self, owl, rdf, rdfs, swrl};
use ontmap_graph::{Node, Triple};

use super::list_encoded::ListEncodedKind;
use super::pairwise::{Grouping, PairwiseEncodedKind};
use super::simple::{Decoded, SimpleKind};
use super::{AxiomTranslator, Pattern};
use crate::error::TranslationError;
use crate::factory::ReadContext;
use crate::model::axiom::named_first;
use crate::model::{
    AnnotationSubject, AnnotationValue, Atom, AxiomBody, AxiomKind, ClassExpr, Entity, EntityKind,
    Individual, Iri, ObjectPropertyExpr, Operand, PropertyExpr, Rule,
};
use crate::object::ONTObject;
use crate::writer::GraphWriter;

type Read = Result<Decoded, TranslationError>;
type Written = Result<Triple, String>;
type Member = Result<ONTObject<Operand>, TranslationError>;

pub fn translator_for(kind: AxiomKind) -> Box<dyn AxiomTranslator> {
    use AxiomKind as K;

    let characteristic = |ty: &'static str, recognize: fn(&ReadContext<'_>, &Triple) -> bool| {
        SimpleKind::new(kind, Pattern::Type(ty), recognize, read_characteristic, write_characteristic)
    };

    match kind {
        K::Declaration => Box::new(SimpleKind::new(
            kind,
            Pattern::Predicate(rdf::TYPE),
            recognize_declaration,
            read_declaration,
            write_declaration,
        )),
        K::SubClassOf => Box::new(SimpleKind::new(
            kind,
            Pattern::Predicate(rdfs::SUB_CLASS_OF),
            recognize_sub_class_of,
            read_sub_class_of,
            write_sub_class_of,
        )),
        K::EquivalentClasses => Box::new(PairwiseEncodedKind::equivalence(
            kind,
            owl::EQUIVALENT_CLASS,
            class_like,
            class_operand,
            |m| classes(m).map(AxiomBody::EquivalentClasses),
            class_members,
        )),
        K::DisjointClasses => Box::new(PairwiseEncodedKind::disjointness(
            kind,
            owl::DISJOINT_WITH,
            Grouping {
                ty: owl::ALL_DISJOINT_CLASSES,
                predicates: &[owl::MEMBERS],
            },
            class_like,
            class_operand,
            |m| classes(m).map(AxiomBody::DisjointClasses),
            class_members,
        )),
        K::DisjointUnion => Box::new(ListEncodedKind::new(
            kind,
            owl::DISJOINT_UNION_OF,
            |ctx, t| ctx.is_declared(&t.subject, EntityKind::Class),
            named_class_operand,
            class_operand,
            assemble_disjoint_union,
            disassemble_disjoint_union,
        )),
        K::SubObjectPropertyOf => Box::new(SimpleKind::new(
            kind,
            Pattern::Predicate(rdfs::SUB_PROPERTY_OF),
            |ctx, t| property_family(ctx, &t.subject, &t.object) == Some(EntityKind::ObjectProperty),
            read_sub_property,
            write_sub_property,
        )),
        K::SubPropertyChainOf => Box::new(ListEncodedKind::new(
            kind,
            owl::PROPERTY_CHAIN_AXIOM,
            |ctx, t| ctx.is_object_property(&t.subject),
            object_property_operand,
            object_property_operand,
            assemble_chain,
            disassemble_chain,
        )),
        K::EquivalentObjectProperties => Box::new(PairwiseEncodedKind::equivalence(
            kind,
            owl::EQUIVALENT_PROPERTY,
            |ctx, n| ctx.is_object_property(n),
            object_property_operand,
            |m| object_properties(m).map(AxiomBody::EquivalentObjectProperties),
            object_property_members,
        )),
        K::DisjointObjectProperties => Box::new(PairwiseEncodedKind::disjointness(
            kind,
            owl::PROPERTY_DISJOINT_WITH,
            Grouping {
                ty: owl::ALL_DISJOINT_PROPERTIES,
                predicates: &[owl::MEMBERS],
            },
            |ctx, n| ctx.is_object_property(n),
            object_property_operand,
            |m| object_properties(m).map(AxiomBody::DisjointObjectProperties),
            object_property_members,
        )),
        K::ObjectPropertyDomain => Box::new(SimpleKind::new(
            kind,
            Pattern::Predicate(rdfs::DOMAIN),
            |ctx, t| ctx.is_object_property(&t.subject),
            read_domain,
            write_domain,
        )),
        K::ObjectPropertyRange => Box::new(SimpleKind::new(
            kind,
            Pattern::Predicate(rdfs::RANGE),
            |ctx, t| ctx.is_object_property(&t.subject),
            read_range,
            write_range,
        )),
        K::InverseObjectProperties => Box::new(SimpleKind::new(
            kind,
            Pattern::Predicate(owl::INVERSE_OF),
            recognize_inverse,
            read_inverse,
            write_inverse,
        )),
        K::FunctionalObjectProperty => Box::new(characteristic(owl::FUNCTIONAL_PROPERTY, |ctx, t| {
            ctx.is_object_property(&t.subject)
        })),
        K::InverseFunctionalObjectProperty => Box::new(characteristic(
            owl::INVERSE_FUNCTIONAL_PROPERTY,
            |ctx, t| ctx.is_object_property(&t.subject),
        )),
        K::ReflexiveObjectProperty => Box::new(characteristic(owl::REFLEXIVE_PROPERTY, |ctx, t| {
            ctx.is_object_property(&t.subject)
        })),
        K::IrreflexiveObjectProperty => Box::new(characteristic(owl::IRREFLEXIVE_PROPERTY, |ctx, t| {
            ctx.is_object_property(&t.subject)
        })),
        K::SymmetricObjectProperty => Box::new(characteristic(owl::SYMMETRIC_PROPERTY, |ctx, t| {
            ctx.is_object_property(&t.subject)
        })),
        K::AsymmetricObjectProperty => Box::new(characteristic(owl::ASYMMETRIC_PROPERTY, |ctx, t| {
            ctx.is_object_property(&t.subject)
        })),
        K::TransitiveObjectProperty => Box::new(characteristic(owl::TRANSITIVE_PROPERTY, |ctx, t| {
            ctx.is_object_property(&t.subject)
        })),
        K::SubDataPropertyOf => Box::new(SimpleKind::new(
            kind,
            Pattern::Predicate(rdfs::SUB_PROPERTY_OF),
            |ctx, t| property_family(ctx, &t.subject, &t.object) == Some(EntityKind::DataProperty),
            read_sub_property,
            write_sub_property,
        )),
        K::EquivalentDataProperties => Box::new(PairwiseEncodedKind::equivalence(
            kind,
            owl::EQUIVALENT_PROPERTY,
            |ctx, n| ctx.is_data_property(n),
            data_property_operand,
            |m| data_properties(m).map(AxiomBody::EquivalentDataProperties),
            data_property_members,
        )),
        K::DisjointDataProperties => Box::new(PairwiseEncodedKind::disjointness(
            kind,
            owl::PROPERTY_DISJOINT_WITH,
            Grouping {
                ty: owl::ALL_DISJOINT_PROPERTIES,
                predicates: &[owl::MEMBERS],
            },
            |ctx, n| ctx.is_data_property(n),
            data_property_operand,
            |m| data_properties(m).map(AxiomBody::DisjointDataProperties),
            data_property_members,
        )),
        K::DataPropertyDomain => Box::new(SimpleKind::new(
            kind,
            Pattern::Predicate(rdfs::DOMAIN),
            |ctx, t| ctx.is_data_property(&t.subject),
            read_domain,
            write_domain,
        )),
        K::DataPropertyRange => Box::new(SimpleKind::new(
            kind,
            Pattern::Predicate(rdfs::RANGE),
            |ctx, t| ctx.is_data_property(&t.subject),
            read_range,
            write_range,
        )),
        K::FunctionalDataProperty => Box::new(characteristic(owl::FUNCTIONAL_PROPERTY, |ctx, t| {
            ctx.is_data_property(&t.subject)
        })),
        K::DatatypeDefinition => Box::new(SimpleKind::new(
            kind,
            Pattern::Predicate(owl::EQUIVALENT_CLASS),
            |ctx, t| {
                ctx.is_declared(&t.subject, EntityKind::Datatype)
                    && !ctx.is_declared(&t.subject, EntityKind::Class)
            },
            read_datatype_definition,
            write_datatype_definition,
        )),
        K::HasKey => Box::new(
            ListEncodedKind::new(
                kind,
                owl::HAS_KEY,
                |ctx, t| class_like(ctx, &t.subject),
                class_operand,
                key_operand,
                assemble_has_key,
                disassemble_has_key,
            )
            .allowing_empty(),
        ),
        K::ClassAssertion => Box::new(SimpleKind::new(
            kind,
            Pattern::Predicate(rdf::TYPE),
            recognize_class_assertion,
            read_class_assertion,
            write_class_assertion,
        )),
        K::SameIndividual => Box::new(PairwiseEncodedKind::equivalence(
            kind,
            owl::SAME_AS,
            individual_like,
            individual_operand,
            |m| individuals(m).map(AxiomBody::SameIndividual),
            individual_members,
        )),
        K::DifferentIndividuals => Box::new(PairwiseEncodedKind::disjointness(
            kind,
            owl::DIFFERENT_FROM,
            Grouping {
                ty: owl::ALL_DIFFERENT,
                predicates: &[owl::DISTINCT_MEMBERS, owl::MEMBERS],
            },
            individual_like,
            individual_operand,
            |m| individuals(m).map(AxiomBody::DifferentIndividuals),
            individual_members,
        )),
        K::ObjectPropertyAssertion => Box::new(SimpleKind::new(
            kind,
            Pattern::Any,
            recognize_object_assertion,
            read_object_assertion,
            write_object_assertion,
        )),
        K::NegativeObjectPropertyAssertion => Box::new(
            SimpleKind::new(
                kind,
                Pattern::Type(owl::NEGATIVE_PROPERTY_ASSERTION),
                |ctx, t| !ctx.triples_with(&t.subject, owl::TARGET_INDIVIDUAL).is_empty(),
                read_negative_assertion,
                write_negative_assertion,
            )
            .rooted(),
        ),
        K::DataPropertyAssertion => Box::new(SimpleKind::new(
            kind,
            Pattern::Any,
            recognize_data_assertion,
            read_data_assertion,
            write_data_assertion,
        )),
        K::NegativeDataPropertyAssertion => Box::new(
            SimpleKind::new(
                kind,
                Pattern::Type(owl::NEGATIVE_PROPERTY_ASSERTION),
                |ctx, t| !ctx.triples_with(&t.subject, owl::TARGET_VALUE).is_empty(),
                read_negative_assertion,
                write_negative_assertion,
            )
            .rooted(),
        ),
        K::AnnotationAssertion => Box::new(SimpleKind::new(
            kind,
            Pattern::Any,
            recognize_annotation_assertion,
            read_annotation_assertion,
            write_annotation_assertion,
        )),
        K::SubAnnotationPropertyOf => Box::new(SimpleKind::new(
            kind,
            Pattern::Predicate(rdfs::SUB_PROPERTY_OF),
            |ctx, t| property_family(ctx, &t.subject, &t.object) == Some(EntityKind::AnnotationProperty),
            read_sub_property,
            write_sub_property,
        )),
        K::AnnotationPropertyDomain => Box::new(SimpleKind::new(
            kind,
            Pattern::Predicate(rdfs::DOMAIN),
            |ctx, t| ctx.is_annotation_property(&t.subject),
            read_domain,
            write_domain,
        )),
        K::AnnotationPropertyRange => Box::new(SimpleKind::new(
            kind,
            Pattern::Predicate(rdfs::RANGE),
            |ctx, t| ctx.is_annotation_property(&t.subject),
            read_range,
            write_range,
        )),
        K::SwrlRule => Box::new(
            SimpleKind::new(kind, Pattern::Type(swrl::IMP), |_, _| true, read_rule, write_rule).rooted(),
        ),
    }
}

// ============================================================================
// Shape tests
// ============================================================================

fn class_like(ctx: &ReadContext<'_>, node: &Node) -> bool {
    match node {
        Node::Iri(_) => ctx.is_declared(node, EntityKind::Class),
        Node::Blank(_) => ctx.has_type(node, owl::CLASS) || ctx.has_type(node, owl::RESTRICTION),
        Node::Literal(_) => false,
    }
}

fn individual_like(ctx: &ReadContext<'_>, node: &Node) -> bool {
    node.is_iri() || ctx.is_anonymous_individual(node)
}

/// Property kind shared by a `subPropertyOf` pair, by preference.
fn property_family(ctx: &ReadContext<'_>, a: &Node, b: &Node) -> Option<EntityKind> {
    let (ka, kb) = (ctx.property_kind(a), ctx.property_kind(b));
    [
        EntityKind::ObjectProperty,
        EntityKind::DataProperty,
        EntityKind::AnnotationProperty,
    ]
    .into_iter()
    .find(|k| ka == Some(*k) || kb == Some(*k))
}

fn unsupported(kind: AxiomKind, triple: &Triple) -> TranslationError {
    TranslationError::UnsupportedEncoding {
        kind,
        triple: triple.clone(),
    }
}

fn unexpected(body: &AxiomBody) -> String {
    format!("unexpected {} body", body.kind().name())
}

fn iri_of(node: &Node) -> Result<Iri, TranslationError> {
    node.as_iri()
        .map(Iri::new)
        .ok_or_else(|| TranslationError::unresolved(node, "IRI"))
}

// ============================================================================
// Member operands
// ============================================================================

fn class_operand(ctx: &ReadContext<'_>, node: &Node) -> Member {
    Ok(ctx.class(node)?.map(|c| Operand::Class(c.clone())))
}

fn named_class_operand(ctx: &ReadContext<'_>, node: &Node) -> Member {
    let class = ctx.class(node)?;
    if class.value().is_anonymous() {
        return Err(TranslationError::unresolved(node, "named class"));
    }
    Ok(class.map(|c| Operand::Class(c.clone())))
}

fn object_property_operand(ctx: &ReadContext<'_>, node: &Node) -> Member {
    Ok(ctx.object_property(node)?.map(|p| Operand::ObjectProperty(p.clone())))
}

fn data_property_operand(ctx: &ReadContext<'_>, node: &Node) -> Member {
    Ok(ctx.data_property(node)?.map(|e| Operand::DataProperty(e.iri.clone())))
}

fn individual_operand(ctx: &ReadContext<'_>, node: &Node) -> Member {
    Ok(ctx.individual(node)?.map(|i| Operand::Individual(i.clone())))
}

fn key_operand(ctx: &ReadContext<'_>, node: &Node) -> Member {
    let (property, triples) = ctx.property(node)?;
    Ok(ONTObject::wrap(Operand::from(property), triples))
}

fn classes(members: Vec<Operand>) -> Option<BTreeSet<ClassExpr>> {
    members
        .into_iter()
        .map(|m| match m {
            Operand::Class(c) => Some(c),
            _ => None,
        })
        .collect()
}

fn object_properties(members: Vec<Operand>) -> Option<BTreeSet<ObjectPropertyExpr>> {
    members
        .into_iter()
        .map(|m| match m {
            Operand::ObjectProperty(p) => Some(p),
            _ => None,
        })
        .collect()
}

fn data_properties(members: Vec<Operand>) -> Option<BTreeSet<Iri>> {
    members
        .into_iter()
        .map(|m| match m {
            Operand::DataProperty(p) => Some(p),
            _ => None,
        })
        .collect()
}

fn individuals(members: Vec<Operand>) -> Option<BTreeSet<Individual>> {
    members
        .into_iter()
        .map(|m| match m {
            Operand::Individual(i) => Some(i),
            _ => None,
        })
        .collect()
}

fn class_members(body: &AxiomBody) -> Option<Vec<Operand>> {
    match body {
        AxiomBody::EquivalentClasses(s) | AxiomBody::DisjointClasses(s) => Some(
            named_first(s, ClassExpr::is_anonymous)
                .into_iter()
                .cloned()
                .map(Operand::Class)
                .collect(),
        ),
        _ => None,
    }
}

fn object_property_members(body: &AxiomBody) -> Option<Vec<Operand>> {
    match body {
        AxiomBody::EquivalentObjectProperties(s) | AxiomBody::DisjointObjectProperties(s) => Some(
            named_first(s, ObjectPropertyExpr::is_anonymous)
                .into_iter()
                .cloned()
                .map(Operand::ObjectProperty)
                .collect(),
        ),
        _ => None,
    }
}

fn data_property_members(body: &AxiomBody) -> Option<Vec<Operand>> {
    match body {
        AxiomBody::EquivalentDataProperties(s) | AxiomBody::DisjointDataProperties(s) => {
            Some(s.iter().cloned().map(Operand::DataProperty).collect())
        }
        _ => None,
    }
}

fn individual_members(body: &AxiomBody) -> Option<Vec<Operand>> {
    match body {
        AxiomBody::SameIndividual(s) | AxiomBody::DifferentIndividuals(s) => Some(
            named_first(s, Individual::is_anonymous)
                .into_iter()
                .cloned()
                .map(Operand::Individual)
                .collect(),
        ),
        _ => None,
    }
}

// ============================================================================
// List-encoded bodies
// ============================================================================

fn assemble_chain(sup: Operand, chain: Vec<Operand>) -> Option<AxiomBody> {
    let Operand::ObjectProperty(sup) = sup else {
        return None;
    };
    let chain = chain
        .into_iter()
        .map(|m| match m {
            Operand::ObjectProperty(p) => Some(p),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    Some(AxiomBody::SubPropertyChainOf { chain, sup })
}

fn disassemble_chain(body: &AxiomBody) -> Option<(Operand, Vec<Operand>)> {
    match body {
        AxiomBody::SubPropertyChainOf { chain, sup } => Some((
            Operand::ObjectProperty(sup.clone()),
            chain.iter().cloned().map(Operand::ObjectProperty).collect(),
        )),
        _ => None,
    }
}

fn assemble_has_key(class: Operand, keys: Vec<Operand>) -> Option<AxiomBody> {
    let Operand::Class(class) = class else {
        return None;
    };
    let properties = keys
        .into_iter()
        .map(|m| match m {
            Operand::ObjectProperty(p) => Some(PropertyExpr::Object(p)),
            Operand::DataProperty(p) => Some(PropertyExpr::Data(p)),
            _ => None,
        })
        .collect::<Option<BTreeSet<_>>>()?;
    Some(AxiomBody::HasKey { class, properties })
}

fn disassemble_has_key(body: &AxiomBody) -> Option<(Operand, Vec<Operand>)> {
    match body {
        AxiomBody::HasKey { class, properties } => Some((
            Operand::Class(class.clone()),
            properties.iter().cloned().map(Operand::from).collect(),
        )),
        _ => None,
    }
}

fn assemble_disjoint_union(class: Operand, members: Vec<Operand>) -> Option<AxiomBody> {
    let Operand::Class(ClassExpr::Class(class)) = class else {
        return None;
    };
    Some(AxiomBody::DisjointUnion {
        class,
        members: classes(members)?,
    })
}

fn disassemble_disjoint_union(body: &AxiomBody) -> Option<(Operand, Vec<Operand>)> {
    match body {
        AxiomBody::DisjointUnion { class, members } => Some((
            Operand::Class(ClassExpr::Class(class.clone())),
            named_first(members, ClassExpr::is_anonymous)
                .into_iter()
                .cloned()
                .map(Operand::Class)
                .collect(),
        )),
        _ => None,
    }
}

// ============================================================================
// Declarations and class axioms
// ============================================================================

fn recognize_declaration(_ctx: &ReadContext<'_>, t: &Triple) -> bool {
    t.subject.is_iri()
        && t.object
            .as_iri()
            .and_then(EntityKind::from_type_iri)
            .is_some()
}

fn read_declaration(_ctx: &ReadContext<'_>, t: &Triple, kind: AxiomKind) -> Read {
    let entity_kind = t.object.as_iri().and_then(EntityKind::from_type_iri);
    let (Some(iri), Some(entity_kind)) = (t.subject.as_iri(), entity_kind) else {
        return Err(unsupported(kind, t));
    };
    Ok(Decoded::new(AxiomBody::Declaration(Entity::new(entity_kind, iri))))
}

fn write_declaration(body: &AxiomBody, w: &mut GraphWriter<'_>) -> Written {
    match body {
        AxiomBody::Declaration(e) => Ok(w.triple(e.iri.to_node(), rdf::TYPE, Node::iri(e.kind.type_iri()))),
        other => Err(unexpected(other)),
    }
}

fn recognize_sub_class_of(ctx: &ReadContext<'_>, t: &Triple) -> bool {
    class_like(ctx, &t.subject) && class_like(ctx, &t.object)
}

fn read_sub_class_of(ctx: &ReadContext<'_>, t: &Triple, _kind: AxiomKind) -> Read {
    let sub = ctx.class(&t.subject)?;
    let sup = ctx.class(&t.object)?;
    Ok(Decoded::new(AxiomBody::SubClassOf {
        sub: sub.value().clone(),
        sup: sup.value().clone(),
    })
    .backed_by(&sub)
    .backed_by(&sup))
}

fn write_sub_class_of(body: &AxiomBody, w: &mut GraphWriter<'_>) -> Written {
    let AxiomBody::SubClassOf { sub, sup } = body else {
        return Err(unexpected(body));
    };
    let s = w.class(sub);
    let o = w.class(sup);
    Ok(w.triple(s, rdfs::SUB_CLASS_OF, o))
}

fn read_datatype_definition(ctx: &ReadContext<'_>, t: &Triple, _kind: AxiomKind) -> Read {
    let datatype = ctx.entity(&t.subject, EntityKind::Datatype)?;
    let range = ctx.data_range(&t.object)?;
    Ok(Decoded::new(AxiomBody::DatatypeDefinition {
        datatype: datatype.value().iri.clone(),
        range: range.value().clone(),
    })
    .backed_by(&datatype)
    .backed_by(&range))
}

fn write_datatype_definition(body: &AxiomBody, w: &mut GraphWriter<'_>) -> Written {
    let AxiomBody::DatatypeDefinition { datatype, range } = body else {
        return Err(unexpected(body));
    };
    let s = w.declare(EntityKind::Datatype, datatype);
    let o = w.data_range(range);
    Ok(w.triple(s, owl::EQUIVALENT_CLASS, o))
}

// ============================================================================
// Property axioms
// ============================================================================

fn read_sub_property(ctx: &ReadContext<'_>, t: &Triple, kind: AxiomKind) -> Read {
    match kind {
        AxiomKind::SubObjectPropertyOf => {
            let sub = ctx.object_property(&t.subject)?;
            let sup = ctx.object_property(&t.object)?;
            Ok(Decoded::new(AxiomBody::SubObjectPropertyOf {
                sub: sub.value().clone(),
                sup: sup.value().clone(),
            })
            .backed_by(&sub)
            .backed_by(&sup))
        }
        AxiomKind::SubDataPropertyOf => {
            let sub = ctx.data_property(&t.subject)?;
            let sup = ctx.data_property(&t.object)?;
            Ok(Decoded::new(AxiomBody::SubDataPropertyOf {
                sub: sub.value().iri.clone(),
                sup: sup.value().iri.clone(),
            })
            .backed_by(&sub)
            .backed_by(&sup))
        }
        AxiomKind::SubAnnotationPropertyOf => {
            let sub = ctx.annotation_property(&t.subject)?;
            let sup = ctx.annotation_property(&t.object)?;
            Ok(Decoded::new(AxiomBody::SubAnnotationPropertyOf {
                sub: sub.value().iri.clone(),
                sup: sup.value().iri.clone(),
            })
            .backed_by(&sub)
            .backed_by(&sup))
        }
        _ => Err(unsupported(kind, t)),
    }
}

fn write_sub_property(body: &AxiomBody, w: &mut GraphWriter<'_>) -> Written {
    let (s, o) = match body {
        AxiomBody::SubObjectPropertyOf { sub, sup } => (w.object_property(sub), w.object_property(sup)),
        AxiomBody::SubDataPropertyOf { sub, sup } => (w.data_property(sub), w.data_property(sup)),
        AxiomBody::SubAnnotationPropertyOf { sub, sup } => {
            (w.annotation_property(sub), w.annotation_property(sup))
        }
        other => return Err(unexpected(other)),
    };
    Ok(w.triple(s, rdfs::SUB_PROPERTY_OF, o))
}

fn read_domain(ctx: &ReadContext<'_>, t: &Triple, kind: AxiomKind) -> Read {
    match kind {
        AxiomKind::ObjectPropertyDomain => {
            let property = ctx.object_property(&t.subject)?;
            let domain = ctx.class(&t.object)?;
            Ok(Decoded::new(AxiomBody::ObjectPropertyDomain {
                property: property.value().clone(),
                domain: domain.value().clone(),
            })
            .backed_by(&property)
            .backed_by(&domain))
        }
        AxiomKind::DataPropertyDomain => {
            let property = ctx.data_property(&t.subject)?;
            let domain = ctx.class(&t.object)?;
            Ok(Decoded::new(AxiomBody::DataPropertyDomain {
                property: property.value().iri.clone(),
                domain: domain.value().clone(),
            })
            .backed_by(&property)
            .backed_by(&domain))
        }
        AxiomKind::AnnotationPropertyDomain => {
            let property = ctx.annotation_property(&t.subject)?;
            Ok(Decoded::new(AxiomBody::AnnotationPropertyDomain {
                property: property.value().iri.clone(),
                domain: iri_of(&t.object)?,
            })
            .backed_by(&property))
        }
        _ => Err(unsupported(kind, t)),
    }
}

fn write_domain(body: &AxiomBody, w: &mut GraphWriter<'_>) -> Written {
    let (s, o) = match body {
        AxiomBody::ObjectPropertyDomain { property, domain } => (w.object_property(property), w.class(domain)),
        AxiomBody::DataPropertyDomain { property, domain } => (w.data_property(property), w.class(domain)),
        AxiomBody::AnnotationPropertyDomain { property, domain } => {
            (w.annotation_property(property), domain.to_node())
        }
        other => return Err(unexpected(other)),
    };
    Ok(w.triple(s, rdfs::DOMAIN, o))
}

fn read_range(ctx: &ReadContext<'_>, t: &Triple, kind: AxiomKind) -> Read {
    match kind {
        AxiomKind::ObjectPropertyRange => {
            let property = ctx.object_property(&t.subject)?;
            let range = ctx.class(&t.object)?;
            Ok(Decoded::new(AxiomBody::ObjectPropertyRange {
                property: property.value().clone(),
                range: range.value().clone(),
            })
            .backed_by(&property)
            .backed_by(&range))
        }
        AxiomKind::DataPropertyRange => {
            let property = ctx.data_property(&t.subject)?;
            let range = ctx.data_range(&t.object)?;
            Ok(Decoded::new(AxiomBody::DataPropertyRange {
                property: property.value().iri.clone(),
                range: range.value().clone(),
            })
            .backed_by(&property)
            .backed_by(&range))
        }
        AxiomKind::AnnotationPropertyRange => {
            let property = ctx.annotation_property(&t.subject)?;
            Ok(Decoded::new(AxiomBody::AnnotationPropertyRange {
                property: property.value().iri.clone(),
                range: iri_of(&t.object)?,
            })
            .backed_by(&property))
        }
        _ => Err(unsupported(kind, t)),
    }
}

fn write_range(body: &AxiomBody, w: &mut GraphWriter<'_>) -> Written {
    let (s, o) = match body {
        AxiomBody::ObjectPropertyRange { property, range } => (w.object_property(property), w.class(range)),
        AxiomBody::DataPropertyRange { property, range } => (w.data_property(property), w.data_range(range)),
        AxiomBody::AnnotationPropertyRange { property, range } => {
            (w.annotation_property(property), range.to_node())
        }
        other => return Err(unexpected(other)),
    };
    Ok(w.triple(s, rdfs::RANGE, o))
}

fn recognize_inverse(ctx: &ReadContext<'_>, t: &Triple) -> bool {
    t.subject.is_iri()
        && t.object.is_iri()
        && (ctx.is_object_property(&t.subject) || ctx.is_object_property(&t.object))
}

fn read_inverse(ctx: &ReadContext<'_>, t: &Triple, _kind: AxiomKind) -> Read {
    let a = ctx.object_property(&t.subject)?;
    let b = ctx.object_property(&t.object)?;
    Ok(Decoded::new(AxiomBody::inverse_object_properties(
        a.value().clone(),
        b.value().clone(),
    ))
    .backed_by(&a)
    .backed_by(&b))
}

fn write_inverse(body: &AxiomBody, w: &mut GraphWriter<'_>) -> Written {
    let AxiomBody::InverseObjectProperties(a, b) = body else {
        return Err(unexpected(body));
    };
    if a.is_anonymous() || b.is_anonymous() {
        return Err("inverse property expressions have no owl:inverseOf encoding".to_string());
    }
    let s = w.object_property(a);
    let o = w.object_property(b);
    Ok(w.triple(s, owl::INVERSE_OF, o))
}

fn read_characteristic(ctx: &ReadContext<'_>, t: &Triple, kind: AxiomKind) -> Read {
    if kind == AxiomKind::FunctionalDataProperty {
        let p = ctx.data_property(&t.subject)?;
        return Ok(Decoded::new(AxiomBody::FunctionalDataProperty(p.value().iri.clone())).backed_by(&p));
    }
    let p = ctx.object_property(&t.subject)?;
    let v = p.value().clone();
    let body = match kind {
        AxiomKind::FunctionalObjectProperty => AxiomBody::FunctionalObjectProperty(v),
        AxiomKind::InverseFunctionalObjectProperty => AxiomBody::InverseFunctionalObjectProperty(v),
        AxiomKind::ReflexiveObjectProperty => AxiomBody::ReflexiveObjectProperty(v),
        AxiomKind::IrreflexiveObjectProperty => AxiomBody::IrreflexiveObjectProperty(v),
        AxiomKind::SymmetricObjectProperty => AxiomBody::SymmetricObjectProperty(v),
        AxiomKind::AsymmetricObjectProperty => AxiomBody::AsymmetricObjectProperty(v),
        AxiomKind::TransitiveObjectProperty => AxiomBody::TransitiveObjectProperty(v),
        _ => return Err(unsupported(kind, t)),
    };
    Ok(Decoded::new(body).backed_by(&p))
}

fn write_characteristic(body: &AxiomBody, w: &mut GraphWriter<'_>) -> Written {
    let (node, ty) = match body {
        AxiomBody::FunctionalObjectProperty(p) => (w.object_property(p), owl::FUNCTIONAL_PROPERTY),
        AxiomBody::InverseFunctionalObjectProperty(p) => {
            (w.object_property(p), owl::INVERSE_FUNCTIONAL_PROPERTY)
        }
        AxiomBody::ReflexiveObjectProperty(p) => (w.object_property(p), owl::REFLEXIVE_PROPERTY),
        AxiomBody::IrreflexiveObjectProperty(p) => (w.object_property(p), owl::IRREFLEXIVE_PROPERTY),
        AxiomBody::SymmetricObjectProperty(p) => (w.object_property(p), owl::SYMMETRIC_PROPERTY),
        AxiomBody::AsymmetricObjectProperty(p) => (w.object_property(p), owl::ASYMMETRIC_PROPERTY),
        AxiomBody::TransitiveObjectProperty(p) => (w.object_property(p), owl::TRANSITIVE_PROPERTY),
        AxiomBody::FunctionalDataProperty(p) => (w.data_property(p), owl::FUNCTIONAL_PROPERTY),
        other => return Err(unexpected(other)),
    };
    Ok(w.triple(node, rdf::TYPE, Node::iri(ty)))
}

// ============================================================================
// Assertions
// ============================================================================

fn recognize_class_assertion(ctx: &ReadContext<'_>, t: &Triple) -> bool {
    let class_ok = match &t.object {
        Node::Iri(iri) => !vocab::is_reserved(iri) && !ctx.is_declared(&t.object, EntityKind::Datatype),
        Node::Blank(_) => class_like(ctx, &t.object),
        Node::Literal(_) => false,
    };
    class_ok && individual_like(ctx, &t.subject)
}

fn read_class_assertion(ctx: &ReadContext<'_>, t: &Triple, _kind: AxiomKind) -> Read {
    let class = ctx.class(&t.object)?;
    let individual = ctx.individual(&t.subject)?;
    Ok(Decoded::new(AxiomBody::ClassAssertion {
        class: class.value().clone(),
        individual: individual.value().clone(),
    })
    .backed_by(&class)
    .backed_by(&individual))
}

fn write_class_assertion(body: &AxiomBody, w: &mut GraphWriter<'_>) -> Written {
    let AxiomBody::ClassAssertion { class, individual } = body else {
        return Err(unexpected(body));
    };
    let s = w.individual(individual);
    let o = w.class(class);
    Ok(w.triple(s, rdf::TYPE, o))
}

fn recognize_object_assertion(ctx: &ReadContext<'_>, t: &Triple) -> bool {
    t.object.is_resource()
        && ctx.is_object_property(&t.predicate)
        && individual_like(ctx, &t.subject)
        && individual_like(ctx, &t.object)
}

fn read_object_assertion(ctx: &ReadContext<'_>, t: &Triple, _kind: AxiomKind) -> Read {
    let property = ctx.object_property(&t.predicate)?;
    let subject = ctx.individual(&t.subject)?;
    let object = ctx.individual(&t.object)?;
    Ok(Decoded::new(AxiomBody::object_property_assertion(
        property.value().clone(),
        subject.value().clone(),
        object.value().clone(),
    ))
    .backed_by(&property)
    .backed_by(&subject)
    .backed_by(&object))
}

fn write_object_assertion(body: &AxiomBody, w: &mut GraphWriter<'_>) -> Written {
    let AxiomBody::ObjectPropertyAssertion {
        property,
        subject,
        object,
    } = body
    else {
        return Err(unexpected(body));
    };
    let (property, subject, object) = match property {
        ObjectPropertyExpr::Named(p) => (p, subject, object),
        ObjectPropertyExpr::Inverse(p) => (p, object, subject),
    };
    w.declare(EntityKind::ObjectProperty, property);
    let s = w.individual(subject);
    let o = w.individual(object);
    Ok(w.triple(s, property.as_str(), o))
}

fn recognize_data_assertion(ctx: &ReadContext<'_>, t: &Triple) -> bool {
    t.object.is_literal() && ctx.is_data_property(&t.predicate) && individual_like(ctx, &t.subject)
}

fn read_data_assertion(ctx: &ReadContext<'_>, t: &Triple, _kind: AxiomKind) -> Read {
    let property = ctx.data_property(&t.predicate)?;
    let subject = ctx.individual(&t.subject)?;
    Ok(Decoded::new(AxiomBody::DataPropertyAssertion {
        property: property.value().iri.clone(),
        subject: subject.value().clone(),
        value: ctx.literal(&t.object)?,
    })
    .backed_by(&property)
    .backed_by(&subject))
}

fn write_data_assertion(body: &AxiomBody, w: &mut GraphWriter<'_>) -> Written {
    let AxiomBody::DataPropertyAssertion {
        property,
        subject,
        value,
    } = body
    else {
        return Err(unexpected(body));
    };
    w.data_property(property);
    let s = w.individual(subject);
    let o = w.literal(value);
    Ok(w.triple(s, property.as_str(), o))
}

fn read_negative_assertion(ctx: &ReadContext<'_>, t: &Triple, kind: AxiomKind) -> Read {
    let root = &t.subject;
    let source = ctx.required(root, owl::SOURCE_INDIVIDUAL, "negative assertion source")?;
    let link = ctx.required(root, owl::ASSERTION_PROPERTY, "negative assertion property")?;
    let subject = ctx.individual(&source.object)?;

    let decoded = match kind {
        AxiomKind::NegativeObjectPropertyAssertion => {
            let target = ctx.required(root, owl::TARGET_INDIVIDUAL, "negative assertion target")?;
            let property = ctx.object_property(&link.object)?;
            let object = ctx.individual(&target.object)?;
            Decoded::new(AxiomBody::NegativeObjectPropertyAssertion {
                property: property.value().clone(),
                subject: subject.value().clone(),
                object: object.value().clone(),
            })
            .backed_by(&property)
            .backed_by(&object)
            .with_triples([target])
        }
        AxiomKind::NegativeDataPropertyAssertion => {
            let target = ctx.required(root, owl::TARGET_VALUE, "negative assertion value")?;
            let property = ctx.data_property(&link.object)?;
            Decoded::new(AxiomBody::NegativeDataPropertyAssertion {
                property: property.value().iri.clone(),
                subject: subject.value().clone(),
                value: ctx.literal(&target.object)?,
            })
            .backed_by(&property)
            .with_triples([target])
        }
        _ => return Err(unsupported(kind, t)),
    };
    Ok(decoded.backed_by(&subject).with_triples([source, link]))
}

fn write_negative_assertion(body: &AxiomBody, w: &mut GraphWriter<'_>) -> Written {
    let root = w.blank();
    let (subject, property, target_predicate, target) = match body {
        AxiomBody::NegativeObjectPropertyAssertion {
            property,
            subject,
            object,
        } => (
            w.individual(subject),
            w.object_property(property),
            owl::TARGET_INDIVIDUAL,
            w.individual(object),
        ),
        AxiomBody::NegativeDataPropertyAssertion {
            property,
            subject,
            value,
        } => (
            w.individual(subject),
            w.data_property(property),
            owl::TARGET_VALUE,
            w.literal(value),
        ),
        other => return Err(unexpected(other)),
    };
    let main = w.triple(root.clone(), rdf::TYPE, Node::iri(owl::NEGATIVE_PROPERTY_ASSERTION));
    w.triple(root.clone(), owl::SOURCE_INDIVIDUAL, subject);
    w.triple(root.clone(), owl::ASSERTION_PROPERTY, property);
    w.triple(root, target_predicate, target);
    Ok(main)
}

// ============================================================================
// Annotation axioms
// ============================================================================

fn recognize_annotation_assertion(ctx: &ReadContext<'_>, t: &Triple) -> bool {
    let subject_ok = match &t.subject {
        Node::Iri(_) => !ctx.has_type(&t.subject, owl::ONTOLOGY),
        Node::Blank(_) => ctx.is_anonymous_individual(&t.subject),
        Node::Literal(_) => false,
    };
    subject_ok && ctx.is_annotation_property(&t.predicate)
}

fn read_annotation_assertion(ctx: &ReadContext<'_>, t: &Triple, kind: AxiomKind) -> Read {
    let property = ctx.annotation_property(&t.predicate)?;
    let subject = match &t.subject {
        Node::Iri(iri) => AnnotationSubject::Iri(Iri::new(iri.as_str())),
        Node::Blank(label) => AnnotationSubject::Anonymous(label.clone()),
        Node::Literal(_) => return Err(unsupported(kind, t)),
    };
    Ok(Decoded::new(AxiomBody::AnnotationAssertion {
        property: property.value().iri.clone(),
        subject,
        value: AnnotationValue::from_node(&t.object),
    })
    .backed_by(&property))
}

fn write_annotation_assertion(body: &AxiomBody, w: &mut GraphWriter<'_>) -> Written {
    let AxiomBody::AnnotationAssertion {
        property,
        subject,
        value,
    } = body
    else {
        return Err(unexpected(body));
    };
    w.annotation_property(property);
    Ok(w.triple(subject.to_node(), property.as_str(), value.to_node()))
}

// ============================================================================
// Rules
// ============================================================================

fn atoms(
    ctx: &ReadContext<'_>,
    head: &Node,
    triples: &mut BTreeSet<Triple>,
) -> Result<BTreeSet<Atom>, TranslationError> {
    let list = ctx.list(head)?;
    triples.extend(list.triples.iter().cloned());
    let mut out = BTreeSet::new();
    for m in &list.members {
        let atom = ctx.atom(m)?;
        triples.extend(atom.triples().iter().cloned());
        out.insert(atom.value().clone());
    }
    Ok(out)
}

fn read_rule(ctx: &ReadContext<'_>, t: &Triple, _kind: AxiomKind) -> Read {
    let root = &t.subject;
    let body_link = ctx.required(root, swrl::BODY, "rule body")?;
    let head_link = ctx.required(root, swrl::HEAD, "rule head")?;
    let mut triples = BTreeSet::new();
    let body = atoms(ctx, &body_link.object, &mut triples)?;
    let head = atoms(ctx, &head_link.object, &mut triples)?;
    Ok(Decoded::new(AxiomBody::SwrlRule(Rule { body, head }))
        .with_triples(triples)
        .with_triples([body_link, head_link]))
}

fn write_rule(body: &AxiomBody, w: &mut GraphWriter<'_>) -> Written {
    let AxiomBody::SwrlRule(rule) = body else {
        return Err(unexpected(body));
    };
    let root = w.blank();
    let main = w.triple(root.clone(), rdf::TYPE, Node::iri(swrl::IMP));
    let body_nodes: Vec<Node> = rule.body.iter().map(|a| w.atom(a)).collect();
    let body_head = w.list(&body_nodes, Some(swrl::ATOM_LIST));
    w.triple(root.clone(), swrl::BODY, body_head);
    let head_nodes: Vec<Node> = rule.head.iter().map(|a| w.atom(a)).collect();
    let head_head = w.list(&head_nodes, Some(swrl::ATOM_LIST));
    w.triple(root, swrl::HEAD, head_head);
    Ok(main)
}
