use shadow_rs::ShadowBuilder;

fn main() {
    // Version strings for `flock-rs --version`
    ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}
