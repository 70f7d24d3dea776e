/* JSON rendering of introspection metadata - a diagnostic view of a
 * type's member table and of codec plans */

use crate::table::codec_for;
use access_types::{Accessibility, CodecPlan, Introspect, ValueKind};
use serde::Serialize;
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Serialize)]
pub struct TypeDescription {
    #[serde(rename = "typeName")]
    pub type_name: String,
    pub members: Vec<MemberDescription>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberDescription {
    pub name: String,
    pub kind: ValueKind,
    pub accessibility: Accessibility,
    pub getter: bool,
    pub setter: bool,
    /* Whether the kind has a primitive codec table entry */
    pub serializable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanDescription {
    pub owner: String,
    pub members: Vec<PlanMemberDescription>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanMemberDescription {
    pub name: String,
    pub kind: ValueKind,
}

pub fn describe_type<T: Introspect>() -> TypeDescription {
    TypeDescription {
        type_name: T::type_name().to_string(),
        members: T::members()
            .iter()
            .map(|entry| MemberDescription {
                name: entry.name.to_string(),
                kind: entry.kind,
                accessibility: entry.accessibility,
                getter: entry.get.is_some(),
                setter: entry.set.is_some(),
                serializable: codec_for(entry.kind).is_ok(),
            })
            .collect(),
    }
}

/* Plan members are listed in plan order, the order the wire carries */
pub fn describe_plan(plan: &CodecPlan) -> PlanDescription {
    PlanDescription {
        owner: plan.owner.name.clone(),
        members: plan
            .members
            .iter()
            .map(|member| PlanMemberDescription {
                name: member.name.clone(),
                kind: member.kind,
            })
            .collect(),
    }
}

pub fn to_json(description: &impl Serialize) -> serde_json::Result<JsonValue> {
    serde_json::to_value(description)
}
