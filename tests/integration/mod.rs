// Integration tests harness
mod pipeline {
    include!("pipeline.rs");
}
mod jit {
    include!("jit.rs");
}
