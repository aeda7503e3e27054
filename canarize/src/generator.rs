mod mapping;

pub use self::mapping::MappingGenerator;
