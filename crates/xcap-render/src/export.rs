//! Standalone exports of the current surface: an HTML page with a three.js
//! viewer and a glTF 2.0 document with an embedded buffer.

use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::json;
use xcap_core::{Result, XcapError};
use xcap_mesh::{MeshBuffers, SurfaceMesh};

use crate::scene::SurfaceScene;

const GLTF_FLOAT: u32 = 5126;
const GLTF_ARRAY_BUFFER: u32 = 34962;
const GLTF_TRIANGLES: u32 = 4;

/// Write an HTML page that renders `scene` with three.js.
///
/// The page carries the positions, normals and texture coordinates of the
/// mesh plus the status readouts. A procedural checker texture shows the
/// parameterization.
pub fn export_html(scene: &SurfaceScene, path: &Path) -> Result<()> {
    let mesh = scene.mesh();
    let bounds = mesh.bounding_box();
    let center = bounds.center();
    let camera_distance = bounds.extents().length().max(1.0) * 1.5;
    let status = scene.status();

    let mut file = BufWriter::new(std::fs::File::create(path)?);

    write!(
        file,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Cross-Cap Viewer</title>
    <style>
        body {{
            margin: 0;
            overflow: hidden;
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background: #000000;
        }}
        #container {{
            width: 100vw;
            height: 100vh;
        }}
        #info {{
            position: absolute;
            top: 10px;
            left: 10px;
            background: rgba(0, 0, 0, 0.7);
            color: white;
            padding: 15px;
            border-radius: 5px;
            font-size: 14px;
        }}
        #info h3 {{
            margin: 0 0 10px 0;
            font-size: 16px;
            border-bottom: 1px solid #666;
            padding-bottom: 5px;
        }}
        #error {{
            position: absolute;
            top: 50%;
            left: 50%;
            transform: translate(-50%, -50%);
            background: rgba(200, 0, 0, 0.9);
            color: white;
            padding: 20px;
            border-radius: 5px;
            display: none;
        }}
    </style>
</head>
<body>
    <div id="container"></div>
    <div id="info">
        <h3>Cross-Cap</h3>
        <div>maxR: {max_r}</div>
        <div>zoom: {zoom}</div>
        <div>angle: {angle}</div>
        <div>point: {point}</div>
        <div>Triangles: {triangles}</div>
    </div>
    <div id="error">Failed to load Three.js from CDN. Please check your internet connection.</div>

    <script src="https://cdnjs.cloudflare.com/ajax/libs/three.js/r128/three.min.js"></script>
    <script>
        if (typeof THREE === 'undefined') document.getElementById('error').style.display='block';
"#,
        max_r = status.max_r,
        zoom = status.zoom,
        angle = status.angle,
        point = status.user_point,
        triangles = mesh.triangle_count(),
    )?;

    write_js_array(&mut file, "positions", mesh.positions.iter().flat_map(|p| [p.x, p.y, p.z]))?;
    write_js_array(&mut file, "normals", mesh.normals.iter().flat_map(|n| [n.x, n.y, n.z]))?;
    write_js_array(&mut file, "uvs", mesh.texcoords.iter().flat_map(|t| [t.x, t.y]))?;

    write!(
        file,
        r#"
        function checkerTexture() {{
            const size = 64;
            const data = new Uint8Array(size * size * 3);
            for (let y = 0; y < size; y++) {{
                for (let x = 0; x < size; x++) {{
                    const on = ((x >> 3) + (y >> 3)) % 2 === 0;
                    const i = (y * size + x) * 3;
                    data[i] = on ? 230 : 40;
                    data[i + 1] = on ? 200 : 90;
                    data[i + 2] = on ? 120 : 160;
                }}
            }}
            const texture = new THREE.DataTexture(data, size, size, THREE.RGBFormat);
            texture.wrapS = THREE.RepeatWrapping;
            texture.wrapT = THREE.RepeatWrapping;
            texture.needsUpdate = true;
            return texture;
        }}

        function initScene() {{
            const scene = new THREE.Scene();
            scene.background = new THREE.Color(0x000000);

            const camera = new THREE.PerspectiveCamera(
                60,
                window.innerWidth / window.innerHeight,
                0.01,
                1000
            );

            const renderer = new THREE.WebGLRenderer({{ antialias: true }});
            renderer.setSize(window.innerWidth, window.innerHeight);
            document.getElementById('container').appendChild(renderer.domElement);

            scene.add(new THREE.AmbientLight(0x404040, 1.5));
            const light = new THREE.DirectionalLight(0xffffff, 1);
            light.position.set({light_x}, {light_y}, {light_z});
            scene.add(light);

            const geometry = new THREE.BufferGeometry();
            geometry.setAttribute('position', new THREE.Float32BufferAttribute(positions, 3));
            geometry.setAttribute('normal', new THREE.Float32BufferAttribute(normals, 3));
            geometry.setAttribute('uv', new THREE.Float32BufferAttribute(uvs, 2));

            const material = new THREE.MeshPhongMaterial({{
                map: checkerTexture(),
                shininess: 30,
                side: THREE.DoubleSide
            }});
            scene.add(new THREE.Mesh(geometry, material));

            const center = new THREE.Vector3({cx:.4}, {cy:.4}, {cz:.4});
            let radius = {distance:.4};
            let theta = Math.PI / 4;
            let phi = Math.PI / 3;

            function updateCameraPosition() {{
                camera.position.x = center.x + radius * Math.sin(phi) * Math.cos(theta);
                camera.position.y = center.y + radius * Math.cos(phi);
                camera.position.z = center.z + radius * Math.sin(phi) * Math.sin(theta);
                camera.lookAt(center);
            }}
            updateCameraPosition();

            let isDragging = false;
            let previousMousePosition = {{ x: 0, y: 0 }};

            renderer.domElement.addEventListener('mousedown', (e) => {{
                isDragging = true;
                previousMousePosition = {{ x: e.clientX, y: e.clientY }};
            }});

            renderer.domElement.addEventListener('mousemove', (e) => {{
                if (isDragging) {{
                    theta -= (e.clientX - previousMousePosition.x) * 0.01;
                    phi = Math.max(0.1, Math.min(Math.PI - 0.1, phi + (e.clientY - previousMousePosition.y) * 0.01));
                    previousMousePosition = {{ x: e.clientX, y: e.clientY }};
                    updateCameraPosition();
                }}
            }});

            renderer.domElement.addEventListener('mouseup', () => {{
                isDragging = false;
            }});

            renderer.domElement.addEventListener('wheel', (e) => {{
                e.preventDefault();
                radius = Math.max(0.5, radius + e.deltaY * 0.005);
                updateCameraPosition();
            }});

            window.addEventListener('resize', () => {{
                camera.aspect = window.innerWidth / window.innerHeight;
                camera.updateProjectionMatrix();
                renderer.setSize(window.innerWidth, window.innerHeight);
            }});

            function animate() {{
                requestAnimationFrame(animate);
                renderer.render(scene, camera);
            }}
            animate();
        }}

        if (typeof THREE !== 'undefined') initScene();
    </script>
</body>
</html>
"#,
        light_x = scene.config().view.light_position[0],
        light_y = scene.config().view.light_position[1],
        light_z = scene.config().view.light_position[2],
        cx = center.x,
        cy = center.y,
        cz = center.z,
        distance = camera_distance,
    )?;

    file.flush()?;
    log::info!("wrote HTML viewer to {}", path.display());
    Ok(())
}

fn write_js_array<W: Write>(
    out: &mut W,
    name: &str,
    values: impl Iterator<Item = f64>,
) -> std::io::Result<()> {
    write!(out, "        const {name} = [")?;
    for (i, v) in values.enumerate() {
        if i > 0 {
            write!(out, ",")?;
        }
        write!(out, "{:.4}", v as f32)?;
    }
    writeln!(out, "];")
}

/// Serialize `mesh` as a glTF 2.0 JSON document.
///
/// The vertex streams live in one base64 data URI buffer laid out as all
/// positions, then all normals, then all texture coordinates. The primitive
/// is a non-indexed triangle list.
pub fn export_gltf_json(mesh: &SurfaceMesh) -> Result<String> {
    if mesh.is_empty() {
        return Err(XcapError::InvalidMesh("cannot export an empty mesh".to_string()));
    }
    let buffers = mesh.to_buffers();
    let count = buffers.vertex_count();
    let binary = gltf_binary_buffer(&buffers);

    let positions_len = buffers.positions.len() * 4;
    let normals_len = buffers.normals.len() * 4;
    let texcoords_len = buffers.texcoords.len() * 4;

    let bounds = mesh.bounding_box();
    let min = [bounds.min.x as f32, bounds.min.y as f32, bounds.min.z as f32];
    let max = [bounds.max.x as f32, bounds.max.y as f32, bounds.max.z as f32];

    let document = json!({
        "asset": {
            "version": "2.0",
            "generator": "xcap-render"
        },
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [{ "name": "Crosscap", "mesh": 0 }],
        "meshes": [{
            "name": "Crosscap",
            "primitives": [{
                "attributes": {
                    "POSITION": 0,
                    "NORMAL": 1,
                    "TEXCOORD_0": 2
                },
                "material": 0,
                "mode": GLTF_TRIANGLES
            }]
        }],
        "materials": [{
            "name": "Surface",
            "pbrMetallicRoughness": {
                "baseColorFactor": [0.8, 0.7, 0.5, 1.0],
                "metallicFactor": 0.0,
                "roughnessFactor": 0.6
            },
            "doubleSided": true
        }],
        "accessors": [
            {
                "bufferView": 0,
                "componentType": GLTF_FLOAT,
                "count": count,
                "type": "VEC3",
                "min": min,
                "max": max
            },
            {
                "bufferView": 1,
                "componentType": GLTF_FLOAT,
                "count": count,
                "type": "VEC3"
            },
            {
                "bufferView": 2,
                "componentType": GLTF_FLOAT,
                "count": count,
                "type": "VEC2"
            }
        ],
        "bufferViews": [
            {
                "buffer": 0,
                "byteOffset": 0,
                "byteLength": positions_len,
                "target": GLTF_ARRAY_BUFFER
            },
            {
                "buffer": 0,
                "byteOffset": positions_len,
                "byteLength": normals_len,
                "target": GLTF_ARRAY_BUFFER
            },
            {
                "buffer": 0,
                "byteOffset": positions_len + normals_len,
                "byteLength": texcoords_len,
                "target": GLTF_ARRAY_BUFFER
            }
        ],
        "buffers": [{
            "byteLength": binary.len(),
            "uri": format!("data:application/octet-stream;base64,{}", base64_encode(&binary))
        }]
    });

    Ok(serde_json::to_string_pretty(&document)?)
}

/// Little-endian concatenation of the three streams.
fn gltf_binary_buffer(buffers: &MeshBuffers) -> Vec<u8> {
    let mut data = Vec::with_capacity(buffers.byte_len());
    for v in buffers
        .positions
        .iter()
        .chain(&buffers.normals)
        .chain(&buffers.texcoords)
    {
        data.extend_from_slice(&v.to_le_bytes());
    }
    data
}

fn base64_encode(data: &[u8]) -> String {
    const CHARS: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
    let mut result = String::with_capacity(data.len().div_ceil(3) * 4);

    for chunk in data.chunks(3) {
        let b1 = chunk[0];
        let b2 = chunk.get(1).copied().unwrap_or(0);
        let b3 = chunk.get(2).copied().unwrap_or(0);

        result.push(CHARS[(b1 >> 2) as usize] as char);
        result.push(CHARS[(((b1 & 0x03) << 4) | (b2 >> 4)) as usize] as char);
        if chunk.len() > 1 {
            result.push(CHARS[(((b2 & 0x0F) << 2) | (b3 >> 6)) as usize] as char);
        } else {
            result.push('=');
        }
        if chunk.len() > 2 {
            result.push(CHARS[(b3 & 0x3F) as usize] as char);
        } else {
            result.push('=');
        }
    }

    result
}
