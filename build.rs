use std::env;

fn main() {
    // Set linking information for C libraries
    // Build scripts see enabled features only through the environment
    if env::var_os("CARGO_FEATURE_C_BINDINGS").is_some() {
        println!("cargo:rustc-link-lib=c");

        if let Ok(pkg_config_path) = env::var("PKG_CONFIG_PATH") {
            println!("cargo:rustc-env=PKG_CONFIG_PATH={}", pkg_config_path);
        }
    }

    // Version string shown by --version and sent in the geocoder user agent
    let version = env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string());
    println!("cargo:rustc-env=ECOROUTE_VERSION={}", version);

    println!("cargo:rerun-if-changed=src/");
    println!("cargo:rerun-if-changed=Cargo.toml");
}
