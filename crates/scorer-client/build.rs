fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Supply a protoc binary from a vendored crate so the build does not
    // depend on a system-installed protobuf compiler.
    let protoc = protoc_bin_vendored::protoc_bin_path()?;
    std::env::set_var("PROTOC", protoc);

    // Compile the proto file for the scoring client
    tonic_build::compile_protos("../../proto/careers.proto")?;
    Ok(())
}
