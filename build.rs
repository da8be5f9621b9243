use std::path::Path;

fn main() {
    let catalog_path = Path::new("catalogs/reference_instances.json");
    validate_catalog_file(catalog_path);
    set_build_dependencies();
}

fn validate_catalog_file(catalog_path: &Path) {
    // Ensure catalog exists at build time
    assert!(
        catalog_path.exists(),
        "\n\nCATALOG BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the catalog file before building.\n",
        catalog_path.display()
    );

    let catalog_contents = std::fs::read_to_string(catalog_path).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            catalog_path.display()
        );
    });

    let catalog: serde_json::Value = serde_json::from_str(&catalog_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            catalog_path.display()
        );
    });

    validate_catalog_structure(&catalog);
}

fn validate_catalog_structure(catalog: &serde_json::Value) {
    assert!(
        catalog.is_object(),
        "\n\nCATALOG BUILD ERROR: Root must be a JSON object\n\
         Got: {catalog}\n"
    );

    let instances = catalog.get("instances").unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Missing 'instances' field\n\
             The catalog must have a top-level 'instances' array.\n"
        );
    });

    let entries = instances.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: 'instances' must be an array\n\
             Got: {instances}\n"
        );
    });

    let mut total_vertices = 0;
    for (i, entry) in entries.iter().enumerate() {
        total_vertices += validate_instance(entry, i);
    }

    println!(
        "cargo:warning=Validated catalog: {} instances, {total_vertices} total vertices",
        entries.len()
    );
}

fn validate_instance(entry: &serde_json::Value, index: usize) -> usize {
    let id = entry
        .get("id")
        .and_then(|v| v.as_str())
        .unwrap_or_else(|| {
            panic!("\n\nCATALOG BUILD ERROR: Instance at index {index} missing 'id' field\n")
        });

    let expected = entry
        .get("expected_cost")
        .and_then(serde_json::Value::as_f64);
    assert!(
        expected.is_some_and(|c| c.is_finite() && c >= 0.0),
        "\n\nCATALOG BUILD ERROR: Instance '{id}' needs a finite, non-negative 'expected_cost'\n"
    );

    let vertices = match (entry.get("costs"), entry.get("points")) {
        (Some(costs), None) => validate_costs(costs, id),
        (None, Some(points)) => validate_points(points, id),
        _ => panic!(
            "\n\nCATALOG BUILD ERROR: Instance '{id}' must have exactly one of 'costs' or 'points'\n"
        ),
    };

    assert!(
        vertices % 2 == 0,
        "\n\nCATALOG BUILD ERROR: Instance '{id}' has an odd vertex count ({vertices})\n\
         A perfect matching needs an even number of vertices.\n"
    );
    vertices
}

fn validate_costs(costs: &serde_json::Value, id: &str) -> usize {
    let rows = costs.as_array().unwrap_or_else(|| {
        panic!("\n\nCATALOG BUILD ERROR: Instance '{id}' 'costs' must be an array of rows\n")
    });
    let n = rows.len();

    let value = |i: usize, j: usize| -> f64 {
        rows[i]
            .as_array()
            .filter(|row| row.len() == n)
            .and_then(|row| row[j].as_f64())
            .unwrap_or_else(|| {
                panic!(
                    "\n\nCATALOG BUILD ERROR: Instance '{id}' row {i} must hold {n} numbers\n"
                )
            })
    };

    for i in 0..n {
        assert!(
            value(i, i) == 0.0,
            "\n\nCATALOG BUILD ERROR: Instance '{id}' has a non-zero diagonal at {i}\n"
        );
        for j in (i + 1)..n {
            let c = value(i, j);
            assert!(
                c >= 0.0 && c == value(j, i),
                "\n\nCATALOG BUILD ERROR: Instance '{id}' cost ({i}, {j}) must be non-negative and symmetric\n"
            );
        }
    }
    n
}

fn validate_points(points: &serde_json::Value, id: &str) -> usize {
    let points = points.as_array().unwrap_or_else(|| {
        panic!("\n\nCATALOG BUILD ERROR: Instance '{id}' 'points' must be an array\n")
    });
    for (j, point) in points.iter().enumerate() {
        assert!(
            point.get("x").and_then(serde_json::Value::as_f64).is_some()
                && point.get("y").and_then(serde_json::Value::as_f64).is_some(),
            "\n\nCATALOG BUILD ERROR: Instance '{id}' point {j} needs numeric 'x' and 'y'\n"
        );
    }
    points.len()
}

fn set_build_dependencies() {
    // Tell cargo to rerun if catalog changes
    println!("cargo:rerun-if-changed=catalogs/reference_instances.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
