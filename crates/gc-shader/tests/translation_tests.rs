//! End-to-end translation tests

use gc_core::TranslateError;
use gc_shader::assemble::join;
use gc_shader::{tokenize, translate, DialectTarget, ShaderStage, Translator};

/// Route translator logs to the test harness output
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

const SHADERS: [&str; 6] = [
    "",
    "#version 120\nattribute vec3 pos;\nvarying vec3 col;\nvoid main(){ gl_Position=vec4(pos,1); col=vec4(1,0,0,1);}\n",
    "#version 120\r\nvarying vec2 uv;\r\nuniform sampler2D tex;\r\nvoid main() {\r\n\tgl_FragColor = texture2D(tex, uv);\r\n}\r\n",
    "/* comment with symbols: @$`~ */\n#define SCALE 2.0e-3\nfloat f(float x) { return x*SCALE; } // trailing",
    "  \t\n\n   ",
    "uniform float größe;\nvoid main() { gl_FragColor = vec4(größe); }",
];

#[test]
fn test_format_preservation() {
    init_tracing();
    for source in SHADERS {
        assert_eq!(join(&tokenize(source)), source);
    }
}

#[test]
fn test_output_is_fixed_point_of_tokenizer() {
    init_tracing();
    for source in SHADERS.iter().skip(1) {
        for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
            let out = translate(source, stage, DialectTarget::Core).unwrap();
            assert_eq!(join(&tokenize(&out)), out);
        }
    }
}

#[test]
fn test_core_translation_is_idempotent() {
    init_tracing();
    for source in SHADERS.iter().skip(1) {
        for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
            let once = translate(source, stage, DialectTarget::Core).unwrap();
            let twice = translate(&once, stage, DialectTarget::Core).unwrap();
            assert_eq!(once, twice, "stage {} source {:?}", stage, source);
        }
    }
}

#[test]
fn test_end_to_end_vertex() {
    init_tracing();
    let source = "attribute vec3 pos;\nvarying vec3 col;\nvoid main(){ gl_Position=vec4(pos,1); col=vec4(1,0,0,1);}\n";
    let out = translate(source, ShaderStage::Vertex, DialectTarget::Core).unwrap();
    assert!(out.contains("in vec3 pos;"));
    assert!(out.contains("out vec3 col;"));
    assert!(out.contains("void main(){ gl_Position=vec4(pos,1); col=vec4(1,0,0,1);}\n"));
}

#[test]
fn test_varying_direction() {
    init_tracing();
    let source = "varying vec4 v;";
    let vertex = translate(source, ShaderStage::Vertex, DialectTarget::Core).unwrap();
    let fragment = translate(source, ShaderStage::Fragment, DialectTarget::Core).unwrap();
    assert!(vertex.ends_with("out vec4 v;"));
    assert!(fragment.ends_with("in vec4 v;"));

    let legacy = translate(source, ShaderStage::Fragment, DialectTarget::Legacy).unwrap();
    assert!(legacy.ends_with("in vec4 v;"));
}

#[test]
fn test_texture_calls_unified() {
    init_tracing();
    let source = "vec4 a = texture2D(s, uv * 2.0);\nvec4 b = textureCube(c, dir);\n";
    let out = translate(source, ShaderStage::Fragment, DialectTarget::Core).unwrap();
    assert!(out.contains("vec4 a = texture(s, uv * 2.0);"));
    assert!(out.contains("vec4 b = texture(c, dir);"));
}

#[test]
fn test_directive_rewrite_leaves_numbers() {
    init_tracing();
    let source = "#version 120\nconst int N = 120;\nfloat k = 1.20;\n";
    let out = translate(source, ShaderStage::Vertex, DialectTarget::Core).unwrap();
    assert!(out.starts_with("#version 330 core\n"));
    assert!(out.contains("const int N = 120;"));
    assert!(out.contains("float k = 1.20;"));
    assert_eq!(out.matches("#version").count(), 1);
}

#[test]
fn test_malformed_directive() {
    init_tracing();
    let err = translate(
        "#version120\nvoid main() {}\n",
        ShaderStage::Vertex,
        DialectTarget::Core,
    )
    .unwrap_err();
    assert_eq!(err, TranslateError::MalformedDirective { line: 1 });
}

#[test]
fn test_truncated_directive() {
    init_tracing();
    let err = translate("#version", ShaderStage::Fragment, DialectTarget::Core).unwrap_err();
    assert_eq!(err, TranslateError::TruncatedDirective { line: 1 });
}

#[test]
fn test_unknown_syntax_passes_through() {
    init_tracing();
    let source = "#extension GL_ARB_foo : enable\nvoid main() { }}} ((( @@ garbage\n";
    let out = translate(source, ShaderStage::Vertex, DialectTarget::Core).unwrap();
    assert!(out.ends_with(source));
}

#[test]
fn test_fragment_output_injection() {
    init_tracing();
    let source = "#version 120\nvoid main() {\n    gl_FragColor = vec4(1.0);\n}\n";
    let out = translate(source, ShaderStage::Fragment, DialectTarget::Core).unwrap();
    assert_eq!(
        out,
        "#version 330 core\n#define GL33\n\nout vec4 GEN_OUTPUT_FINAL_COLOR;\n\nvoid main() {\n    GEN_OUTPUT_FINAL_COLOR = vec4(1.0);\n}\n"
    );
}

#[test]
fn test_main_in_comment_is_not_entry_point() {
    init_tracing();
    let source = "#version 120\n// entry: void main() below\nvoid main() {\n  gl_FragColor = vec4(1);\n}\n";
    let out = translate(source, ShaderStage::Fragment, DialectTarget::Core).unwrap();
    assert!(out.contains("// entry: void main() below\nout vec4 GEN_OUTPUT_FINAL_COLOR;\n\nvoid main() {"));
    for line in out.lines().filter(|l| l.contains("out vec4")) {
        assert!(!line.trim_start().starts_with("//"), "declaration commented out: {:?}", line);
    }
}

#[test]
fn test_translator_shared_across_threads() {
    init_tracing();
    let translator = Translator::for_target(DialectTarget::Core);
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|n| {
                let translator = &translator;
                scope.spawn(move || {
                    let source = format!("varying float v{};", n);
                    translator.translate(&source, ShaderStage::Vertex).unwrap()
                })
            })
            .collect();
        for (n, handle) in handles.into_iter().enumerate() {
            assert!(handle.join().unwrap().ends_with(&format!("out float v{};", n)));
        }
    });
}
