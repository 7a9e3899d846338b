//! Type graph fixtures
//!
//! One graph covers every scenario; each test picks the pair it needs.

use mapgen_engine::config::{
    FormatProvider, FormatProviderRegistry, MapperConfig, MappingConfigPatch,
};
use mapgen_engine::pipeline::{MapperDefinition, MappingRequest};
use mapgen_engine::{MemberDescriptor, TypeDescriptor, TypeGraph, TypeGraphBuilder, TypeRef};

pub fn fixture_graph() -> TypeGraph {
    TypeGraphBuilder::with_builtins()
        // {id, modelName} → {id, ModelName}
        .add(
            TypeDescriptor::object("CarSummary")
                .with_member(MemberDescriptor::new("id", "int32"))
                .with_member(MemberDescriptor::new("modelName", "string")),
        )
        .add(
            TypeDescriptor::object("CarSummaryDto")
                .with_member(MemberDescriptor::new("id", "int32"))
                .with_member(MemberDescriptor::new("ModelName", "string")),
        )
        // decimal → string formatting
        .add(
            TypeDescriptor::object("PriceTag")
                .with_member(MemberDescriptor::new("price", "decimal")),
        )
        .add(
            TypeDescriptor::object("PriceTagDto")
                .with_member(MemberDescriptor::new("price", "string")),
        )
        // identical array on both sides
        .add(
            TypeDescriptor::object("Car")
                .with_member(MemberDescriptor::new("id", "int32"))
                .with_member(MemberDescriptor::new("modelName", "string")),
        )
        .add(TypeDescriptor::collection("Car[]", "Car"))
        .add(TypeDescriptor::object("Garage").with_member(MemberDescriptor::new("cars", "Car[]")))
        .add(
            TypeDescriptor::object("GarageCopy")
                .with_member(MemberDescriptor::new("cars", "Car[]")),
        )
        // self reference
        .add(
            TypeDescriptor::object("Node")
                .with_member(MemberDescriptor::new("value", "int32"))
                .with_member(MemberDescriptor::new("next", "Node").nullable()),
        )
        .add(
            TypeDescriptor::object("NodeDto")
                .with_member(MemberDescriptor::new("value", "int64"))
                .with_member(MemberDescriptor::new("next", "NodeDto").nullable()),
        )
        // mutual reference through a collection
        .add(
            TypeDescriptor::object("Team")
                .with_member(MemberDescriptor::new("name", "string"))
                .with_member(MemberDescriptor::new("players", "List<Player>")),
        )
        .add(
            TypeDescriptor::object("Player")
                .with_member(MemberDescriptor::new("name", "string"))
                .with_member(MemberDescriptor::new("team", "Team").nullable()),
        )
        .add(TypeDescriptor::collection("List<Player>", "Player"))
        .add(
            TypeDescriptor::object("TeamDto")
                .with_member(MemberDescriptor::new("name", "string"))
                .with_member(MemberDescriptor::new("players", "List<PlayerDto>")),
        )
        .add(
            TypeDescriptor::object("PlayerDto")
                .with_member(MemberDescriptor::new("name", "string"))
                .with_member(MemberDescriptor::new("team", "TeamDto").nullable()),
        )
        .add(TypeDescriptor::collection("List<PlayerDto>", "PlayerDto"))
        // enums
        .add(TypeDescriptor::enum_of("Letters", &["A", "B", "C"]))
        .add(TypeDescriptor::enum_of("LettersDto", &["A", "B"]))
        .add(
            TypeDescriptor::object("Order")
                .with_member(MemberDescriptor::new("letter", "Letters")),
        )
        .add(
            TypeDescriptor::object("OrderDto")
                .with_member(MemberDescriptor::new("letter", "LettersDto")),
        )
        .build()
        .expect("fixture graph is valid")
}

pub fn request(method: &str, source: &str, target: &str) -> MappingRequest {
    MappingRequest::new(method, TypeRef::new(source), TypeRef::new(target))
}

/// Mapper with a single method
pub fn single_mapper(name: &str, request: MappingRequest) -> Vec<MapperDefinition> {
    vec![MapperDefinition::new(name).with_method(request)]
}

pub fn mapper_with_settings(name: &str, settings: MappingConfigPatch) -> MapperDefinition {
    MapperDefinition::new(name).with_config(MapperConfig::new().with_settings(settings))
}

/// `invariant` (default) and `german`
pub fn providers_with_default() -> FormatProviderRegistry {
    FormatProviderRegistry::new()
        .with("invariant", FormatProvider::default_provider())
        .with("german", FormatProvider::new().with_culture("de-DE"))
}
