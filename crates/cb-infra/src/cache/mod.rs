mod object_cache;

pub use object_cache::ObjectCache;
