//! Full use-case workflow against the SQLite store with the audit trail wired in

use std::sync::Arc;

use agrorural_application::{
    AgroServices, ApplicationError, AuditQuery, CreateCultivoCommand, CreateCulturaCommand,
    CreateProdutorCommand, CreatePropriedadeCommand, CreateSafraCommand, UpdatePropriedadeCommand,
};
use agrorural_audit::AuditPublisher;
use agrorural_persistence::{connect, SqliteStore};

async fn services() -> (AgroServices, Arc<SqliteStore>) {
    services_on("sqlite::memory:").await
}

async fn services_on(database_url: &str) -> (AgroServices, Arc<SqliteStore>) {
    let store = Arc::new(connect(database_url).await.unwrap());
    let audit = Arc::new(AuditPublisher::new(store.clone()));
    (AgroServices::new(store.clone(), audit), store)
}

async fn produtor(services: &AgroServices, documento: &str, nome: &str) -> String {
    services
        .produtores
        .create(CreateProdutorCommand {
            documento: documento.into(),
            nome: nome.into(),
            propriedade_ids: vec![],
        })
        .await
        .unwrap()
        .id
}

async fn propriedade(services: &AgroServices, nome: &str, owners: Vec<String>) -> String {
    services
        .propriedades
        .create(CreatePropriedadeCommand {
            nome: nome.into(),
            cidade: "Rio Verde".into(),
            estado: "GO".into(),
            area_total: 800.0,
            area_agricultavel: 500.0,
            area_vegetacao: 250.0,
            produtor_ids: owners,
        })
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn test_cascade_keeps_co_owned_property() {
    let (services, _store) = services().await;
    let ana = produtor(&services, "52998224725", "Ana").await;
    let bruno = produtor(&services, "11222333000181", "Agro Bruno Ltda").await;

    let solo = propriedade(&services, "Sítio da Ana", vec![ana.clone()]).await;
    let shared =
        propriedade(&services, "Fazenda Sociedade", vec![ana.clone(), bruno.clone()]).await;

    let safra = services
        .safras
        .create(CreateSafraCommand {
            propriedade_id: solo.clone(),
            ano: 2024,
            descricao: None,
        })
        .await
        .unwrap();
    let milho = services
        .culturas
        .create(CreateCulturaCommand { nome: "Milho".into() })
        .await
        .unwrap();
    services
        .cultivos
        .create(CreateCultivoCommand {
            propriedade_id: solo.clone(),
            cultura_id: milho.id.clone(),
            safra_id: safra.id.clone(),
            area_plantada: 320.5,
        })
        .await
        .unwrap();

    let report = services.produtores.remove(&ana).await.unwrap();
    assert_eq!(report.produtores, 1);
    assert_eq!(report.propriedades, 1);
    assert_eq!(report.vinculos, 2);
    assert_eq!(report.safras, 1);
    assert_eq!(report.cultivos, 1);

    assert!(matches!(
        services.propriedades.find_one(&solo).await,
        Err(ApplicationError::NotFound { .. })
    ));
    let kept = services.propriedades.find_one(&shared).await.unwrap();
    assert_eq!(kept.produtor_ids, vec![bruno]);

    // crop types are reference data and survive the cascade
    assert_eq!(services.culturas.find_all().await.unwrap().total, 1);
}

#[tokio::test]
async fn test_area_rules_enforced_on_sqlite() {
    let (services, _store) = services().await;
    let ana = produtor(&services, "52998224725", "Ana").await;
    let fazenda = propriedade(&services, "Fazenda", vec![ana]).await;
    let safra = services
        .safras
        .create(CreateSafraCommand {
            propriedade_id: fazenda.clone(),
            ano: 2025,
            descricao: Some("verão".into()),
        })
        .await
        .unwrap();
    let soja = services
        .culturas
        .create(CreateCulturaCommand { nome: "Soja".into() })
        .await
        .unwrap();

    let plant = |area: f64| CreateCultivoCommand {
        propriedade_id: fazenda.clone(),
        cultura_id: soja.id.clone(),
        safra_id: safra.id.clone(),
        area_plantada: area,
    };

    services.cultivos.create(plant(300.0)).await.unwrap();
    services.cultivos.create(plant(200.0)).await.unwrap();
    let err = services.cultivos.create(plant(0.01)).await.unwrap_err();
    assert!(matches!(err, ApplicationError::BusinessRuleViolation(_)));

    let err = services
        .propriedades
        .update(
            &fazenda,
            UpdatePropriedadeCommand {
                area_agricultavel: Some(450.0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::BusinessRuleViolation(_)));
}

/// Fire `tasks` plantings of `area` ha at once into a 500 ha season
async fn plant_concurrently(services: AgroServices, tasks: usize, area: f64) -> usize {
    let ana = produtor(&services, "52998224725", "Ana").await;
    let fazenda = propriedade(&services, "Fazenda", vec![ana]).await;
    let safra = services
        .safras
        .create(CreateSafraCommand {
            propriedade_id: fazenda.clone(),
            ano: 2025,
            descricao: None,
        })
        .await
        .unwrap();
    let soja = services
        .culturas
        .create(CreateCulturaCommand { nome: "Soja".into() })
        .await
        .unwrap();

    let services = Arc::new(services);
    let handles: Vec<_> = (0..tasks)
        .map(|_| {
            let services = Arc::clone(&services);
            let cmd = CreateCultivoCommand {
                propriedade_id: fazenda.clone(),
                cultura_id: soja.id.clone(),
                safra_id: safra.id.clone(),
                area_plantada: area,
            };
            tokio::spawn(async move { services.cultivos.create(cmd).await })
        })
        .collect();

    let mut planted = 0.0;
    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(cultivo) => {
                created += 1;
                planted += cultivo.area_plantada;
            }
            Err(ApplicationError::BusinessRuleViolation(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert!(planted <= 500.0, "planted {planted} exceeds arable 500");
    created
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_plantings_on_sqlite() {
    let (services, _store) = services().await;
    assert_eq!(plant_concurrently(services, 8, 120.0).await, 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_plantings_on_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("agrorural.db").display());
    let (services, store) = services_on(&url).await;

    assert_eq!(plant_concurrently(services, 8, 200.0).await, 2);
    store.close().await;
}

#[tokio::test]
async fn test_audit_entries_persisted() {
    let (services, _store) = services().await;
    let ana = produtor(&services, "52998224725", "Ana").await;
    services.produtores.remove(&ana).await.unwrap();

    let trail = services
        .auditoria
        .list(AuditQuery {
            entity_id: Some(ana.clone()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(trail.total, 2);
    assert_eq!(trail.items[0].action, "delete");
    assert_eq!(trail.items[0].details["cascade"]["produtores"], 1);
    assert_eq!(trail.items[1].action, "create");
    assert_eq!(trail.items[1].details["nome"], "Ana");
}
