//! Service use-case tests against the in-memory store

use std::sync::Arc;

use agrorural_application::{
    AgroServices, ApplicationError, AuditQuery, CreateCultivoCommand, CreateCulturaCommand,
    CreateProdutorCommand, CreatePropriedadeCommand, CreateSafraCommand, CultivoQuery,
    InMemoryEventPublisher, ProdutorDto, PropriedadeDto, SafraDto, UpdateCultivoCommand,
    UpdateCulturaCommand, UpdateProdutorCommand, UpdatePropriedadeCommand, UpdateSafraCommand,
};
use agrorural_domain::entities::{AuditAction, EntityKind};
use agrorural_domain::repositories::Page;
use agrorural_persistence::InMemoryStore;

struct Harness {
    services: AgroServices,
    events: Arc<InMemoryEventPublisher>,
}

fn harness() -> Harness {
    let events = Arc::new(InMemoryEventPublisher::new());
    let services = AgroServices::new(Arc::new(InMemoryStore::new()), events.clone());
    Harness { services, events }
}

async fn produtor(h: &Harness, documento: &str) -> ProdutorDto {
    h.services
        .produtores
        .create(CreateProdutorCommand {
            documento: documento.to_string(),
            nome: format!("Produtor {}", documento),
            propriedade_ids: vec![],
        })
        .await
        .unwrap()
}

async fn propriedade(h: &Harness, owners: &[&ProdutorDto], agricultavel: f64) -> PropriedadeDto {
    h.services
        .propriedades
        .create(CreatePropriedadeCommand {
            nome: "Fazenda Esperança".into(),
            cidade: "Lucas do Rio Verde".into(),
            estado: "MT".into(),
            area_total: 1000.0,
            area_agricultavel: agricultavel,
            area_vegetacao: 200.0,
            produtor_ids: owners.iter().map(|o| o.id.clone()).collect(),
        })
        .await
        .unwrap()
}

async fn safra(h: &Harness, propriedade: &PropriedadeDto, ano: i32) -> SafraDto {
    h.services
        .safras
        .create(CreateSafraCommand {
            propriedade_id: propriedade.id.clone(),
            ano,
            descricao: None,
        })
        .await
        .unwrap()
}

async fn cultura(h: &Harness, nome: &str) -> String {
    h.services
        .culturas
        .create(CreateCulturaCommand { nome: nome.into() })
        .await
        .unwrap()
        .id
}

fn plant(p: &PropriedadeDto, s: &SafraDto, cultura_id: &str, area: f64) -> CreateCultivoCommand {
    CreateCultivoCommand {
        propriedade_id: p.id.clone(),
        cultura_id: cultura_id.to_string(),
        safra_id: s.id.clone(),
        area_plantada: area,
    }
}

// ============================================================================
// Produtor
// ============================================================================

#[tokio::test]
async fn test_create_produtor_formats_documento() {
    let h = harness();
    let dto = produtor(&h, "11.222.333/0001-81").await;
    assert_eq!(dto.documento, "11222333000181");
    assert_eq!(dto.documento_formatado, "11.222.333/0001-81");
    assert_eq!(dto.tipo_documento, "CNPJ");

    let events = h.events.events().await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].entity(), EntityKind::Produtor);
    assert_eq!(events[0].action(), AuditAction::Create);
}

#[tokio::test]
async fn test_create_produtor_invalid_documento() {
    let h = harness();
    let err = h
        .services
        .produtores
        .create(CreateProdutorCommand {
            documento: "111.111.111-11".into(),
            nome: "Fulano".into(),
            propriedade_ids: vec![],
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::ValidationFailed(_)));
    assert!(h.events.events().await.is_empty());
}

#[tokio::test]
async fn test_duplicate_documento_conflicts() {
    let h = harness();
    produtor(&h, "52998224725").await;
    let err = h
        .services
        .produtores
        .create(CreateProdutorCommand {
            documento: "529.982.247-25".into(),
            nome: "Outro".into(),
            propriedade_ids: vec![],
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Conflict(_)));
}

#[tokio::test]
async fn test_update_produtor_cannot_orphan_propriedade() {
    let h = harness();
    let ana = produtor(&h, "52998224725").await;
    let fazenda = propriedade(&h, &[&ana], 500.0).await;

    let err = h
        .services
        .produtores
        .update(
            &ana.id,
            UpdateProdutorCommand {
                propriedade_ids: Some(vec![]),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::BusinessRuleViolation(_)));

    let reloaded = h.services.propriedades.find_one(&fazenda.id).await.unwrap();
    assert_eq!(reloaded.produtor_ids, vec![ana.id.clone()]);
}

#[tokio::test]
async fn test_update_produtor_links_shared_propriedade() {
    let h = harness();
    let ana = produtor(&h, "52998224725").await;
    let bia = produtor(&h, "12345678909").await;
    let fazenda = propriedade(&h, &[&ana], 500.0).await;

    let updated = h
        .services
        .produtores
        .update(
            &bia.id,
            UpdateProdutorCommand {
                nome: Some("Beatriz".into()),
                propriedade_ids: Some(vec![fazenda.id.clone()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.nome, "Beatriz");
    assert_eq!(updated.propriedade_ids, vec![fazenda.id.clone()]);

    let owners = h
        .services
        .propriedades
        .find_one(&fazenda.id)
        .await
        .unwrap()
        .produtor_ids;
    assert_eq!(owners.len(), 2);
}

#[tokio::test]
async fn test_remove_produtor_cascades() {
    let h = harness();
    let ana = produtor(&h, "52998224725").await;
    let bia = produtor(&h, "12345678909").await;
    let solo = propriedade(&h, &[&ana], 500.0).await;
    let shared = propriedade(&h, &[&ana, &bia], 500.0).await;

    let s = safra(&h, &solo, 2024).await;
    let soja = cultura(&h, "Soja").await;
    h.services
        .cultivos
        .create(plant(&solo, &s, &soja, 200.0))
        .await
        .unwrap();

    let report = h.services.produtores.remove(&ana.id).await.unwrap();
    assert_eq!(report.produtores, 1);
    assert_eq!(report.propriedades, 1);
    assert_eq!(report.safras, 1);
    assert_eq!(report.cultivos, 1);

    assert!(matches!(
        h.services.propriedades.find_one(&solo.id).await,
        Err(ApplicationError::NotFound { .. })
    ));
    let kept = h.services.propriedades.find_one(&shared.id).await.unwrap();
    assert_eq!(kept.produtor_ids, vec![bia.id.clone()]);

    let last = h.events.events().await.pop().unwrap();
    assert_eq!(last.action(), AuditAction::Delete);
    assert_eq!(last.snapshot()["cascade"]["propriedades"], 1);
}

#[tokio::test]
async fn test_find_produtor_bad_id() {
    let h = harness();
    let err = h.services.produtores.find_one("not-a-uuid").await.unwrap_err();
    assert!(matches!(err, ApplicationError::ValidationFailed(_)));
}

// ============================================================================
// Propriedade
// ============================================================================

#[tokio::test]
async fn test_create_propriedade_requires_owner() {
    let h = harness();
    let err = h
        .services
        .propriedades
        .create(CreatePropriedadeCommand {
            nome: "Sem dono".into(),
            cidade: "Uberaba".into(),
            estado: "MG".into(),
            area_total: 10.0,
            area_agricultavel: 5.0,
            area_vegetacao: 5.0,
            produtor_ids: vec![],
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::ValidationFailed(_)));
}

#[tokio::test]
async fn test_create_propriedade_area_sum_exceeded() {
    let h = harness();
    let ana = produtor(&h, "52998224725").await;
    let err = h
        .services
        .propriedades
        .create(CreatePropriedadeCommand {
            nome: "Pequena".into(),
            cidade: "Uberaba".into(),
            estado: "MG".into(),
            area_total: 100.0,
            area_agricultavel: 80.0,
            area_vegetacao: 30.0,
            produtor_ids: vec![ana.id],
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::BusinessRuleViolation(_)));
}

#[tokio::test]
async fn test_create_propriedade_invalid_estado() {
    let h = harness();
    let ana = produtor(&h, "52998224725").await;
    let err = h
        .services
        .propriedades
        .create(CreatePropriedadeCommand {
            nome: "Fazenda".into(),
            cidade: "Lugar".into(),
            estado: "XX".into(),
            area_total: 100.0,
            area_agricultavel: 50.0,
            area_vegetacao: 30.0,
            produtor_ids: vec![ana.id],
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::ValidationFailed(_)));
}

#[tokio::test]
async fn test_shrinking_arable_area_below_plantings() {
    let h = harness();
    let ana = produtor(&h, "52998224725").await;
    let fazenda = propriedade(&h, &[&ana], 600.0).await;
    let s = safra(&h, &fazenda, 2023).await;
    let milho = cultura(&h, "Milho").await;
    h.services
        .cultivos
        .create(plant(&fazenda, &s, &milho, 400.0))
        .await
        .unwrap();

    let err = h
        .services
        .propriedades
        .update(
            &fazenda.id,
            UpdatePropriedadeCommand {
                area_agricultavel: Some(399.0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::BusinessRuleViolation(_)));

    let ok = h
        .services
        .propriedades
        .update(
            &fazenda.id,
            UpdatePropriedadeCommand {
                area_agricultavel: Some(400.0),
                estado: Some("go".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(ok.area_agricultavel, 400.0);
    assert_eq!(ok.estado, "GO");
}

#[tokio::test]
async fn test_list_propriedades_paged() {
    let h = harness();
    let ana = produtor(&h, "52998224725").await;
    for _ in 0..3 {
        propriedade(&h, &[&ana], 100.0).await;
    }
    let page = h
        .services
        .propriedades
        .find_all(Page::new(Some(2), None))
        .await
        .unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total, 3);
}

// ============================================================================
// Cultura
// ============================================================================

#[tokio::test]
async fn test_cultura_unique_name_case_insensitive() {
    let h = harness();
    cultura(&h, "Café").await;
    let err = h
        .services
        .culturas
        .create(CreateCulturaCommand { nome: "CAFÉ".into() })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Conflict(_)));
}

#[tokio::test]
async fn test_rename_cultura_keeps_own_name_case_change() {
    let h = harness();
    let id = cultura(&h, "algodao").await;
    let dto = h
        .services
        .culturas
        .update(&id, UpdateCulturaCommand { nome: "Algodao".into() })
        .await
        .unwrap();
    assert_eq!(dto.nome, "Algodao");
}

#[tokio::test]
async fn test_remove_cultura_in_use_conflicts() {
    let h = harness();
    let ana = produtor(&h, "52998224725").await;
    let fazenda = propriedade(&h, &[&ana], 500.0).await;
    let s = safra(&h, &fazenda, 2024).await;
    let soja = cultura(&h, "Soja").await;
    h.services
        .cultivos
        .create(plant(&fazenda, &s, &soja, 10.0))
        .await
        .unwrap();

    let err = h.services.culturas.remove(&soja).await.unwrap_err();
    assert!(matches!(err, ApplicationError::Conflict(_)));

    let cana = cultura(&h, "Cana").await;
    h.services.culturas.remove(&cana).await.unwrap();
    assert_eq!(h.services.culturas.find_all().await.unwrap().total, 1);
}

// ============================================================================
// Safra
// ============================================================================

#[tokio::test]
async fn test_safra_one_per_year() {
    let h = harness();
    let ana = produtor(&h, "52998224725").await;
    let fazenda = propriedade(&h, &[&ana], 500.0).await;
    safra(&h, &fazenda, 2024).await;

    let err = h
        .services
        .safras
        .create(CreateSafraCommand {
            propriedade_id: fazenda.id.clone(),
            ano: 2024,
            descricao: Some("repetida".into()),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Conflict(_)));
}

#[tokio::test]
async fn test_safra_year_out_of_range() {
    let h = harness();
    let ana = produtor(&h, "52998224725").await;
    let fazenda = propriedade(&h, &[&ana], 500.0).await;
    let err = h
        .services
        .safras
        .create(CreateSafraCommand {
            propriedade_id: fazenda.id,
            ano: 1800,
            descricao: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::ValidationFailed(_)));
}

#[tokio::test]
async fn test_safra_unknown_propriedade() {
    let h = harness();
    let err = h
        .services
        .safras
        .create(CreateSafraCommand {
            propriedade_id: "7f1b3c8e-2d4a-4e6f-9a0b-1c2d3e4f5a6b".into(),
            ano: 2024,
            descricao: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound { .. }));
}

#[tokio::test]
async fn test_update_and_remove_safra() {
    let h = harness();
    let ana = produtor(&h, "52998224725").await;
    let fazenda = propriedade(&h, &[&ana], 500.0).await;
    let s = safra(&h, &fazenda, 2023).await;
    let soja = cultura(&h, "Soja").await;
    h.services
        .cultivos
        .create(plant(&fazenda, &s, &soja, 10.0))
        .await
        .unwrap();

    let updated = h
        .services
        .safras
        .update(
            &s.id,
            UpdateSafraCommand {
                ano: Some(2025),
                descricao: Some("Safra 25".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.ano, 2025);
    assert_eq!(updated.descricao.as_deref(), Some("Safra 25"));

    let cleared = h
        .services
        .safras
        .update(
            &s.id,
            UpdateSafraCommand {
                ano: None,
                descricao: Some("   ".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(cleared.ano, 2025);
    assert_eq!(cleared.descricao, None);

    let report = h.services.safras.remove(&s.id).await.unwrap();
    assert_eq!(report.cultivos, 1);

    let listed = h
        .services
        .safras
        .find_all(Some(&fazenda.id), Page::default())
        .await
        .unwrap();
    assert_eq!(listed.total, 0);
}

// ============================================================================
// Cultivo
// ============================================================================

#[tokio::test]
async fn test_planted_area_limit_per_safra() {
    let h = harness();
    let ana = produtor(&h, "52998224725").await;
    let fazenda = propriedade(&h, &[&ana], 500.0).await;
    let s2023 = safra(&h, &fazenda, 2023).await;
    let s2024 = safra(&h, &fazenda, 2024).await;
    let soja = cultura(&h, "Soja").await;
    let milho = cultura(&h, "Milho").await;

    h.services
        .cultivos
        .create(plant(&fazenda, &s2023, &soja, 300.0))
        .await
        .unwrap();
    h.services
        .cultivos
        .create(plant(&fazenda, &s2023, &milho, 200.0))
        .await
        .unwrap();

    let err = h
        .services
        .cultivos
        .create(plant(&fazenda, &s2023, &milho, 0.5))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::BusinessRuleViolation(_)));

    // another season starts from zero
    h.services
        .cultivos
        .create(plant(&fazenda, &s2024, &soja, 500.0))
        .await
        .unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_plantings_respect_arable_area() {
    let h = harness();
    let ana = produtor(&h, "52998224725").await;
    let fazenda = propriedade(&h, &[&ana], 100.0).await;
    let s = safra(&h, &fazenda, 2024).await;
    let soja = cultura(&h, "Soja").await;

    let services = Arc::new(h.services);
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let services = Arc::clone(&services);
            let cmd = plant(&fazenda, &s, &soja, 60.0);
            tokio::spawn(async move { services.cultivos.create(cmd).await })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(ApplicationError::BusinessRuleViolation(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(created, 1);

    let listed = services
        .cultivos
        .find_all(
            CultivoQuery {
                safra_id: Some(s.id.clone()),
                ..Default::default()
            },
            Page::default(),
        )
        .await
        .unwrap();
    let planted: f64 = listed.items.iter().map(|c| c.area_plantada).sum();
    assert!(planted <= 100.0, "planted {planted} exceeds arable 100");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_unlinks_keep_an_owner() {
    let h = harness();
    let ana = produtor(&h, "52998224725").await;
    let bia = produtor(&h, "12345678909").await;
    let shared = propriedade(&h, &[&ana, &bia], 500.0).await;

    let services = Arc::new(h.services);
    let handles: Vec<_> = [ana.id.clone(), bia.id.clone()]
        .into_iter()
        .map(|id| {
            let services = Arc::clone(&services);
            tokio::spawn(async move {
                services
                    .produtores
                    .update(
                        &id,
                        UpdateProdutorCommand {
                            propriedade_ids: Some(vec![]),
                            ..Default::default()
                        },
                    )
                    .await
            })
        })
        .collect();

    let mut unlinked = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => unlinked += 1,
            Err(ApplicationError::BusinessRuleViolation(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(unlinked, 1);

    let owners = services
        .propriedades
        .find_one(&shared.id)
        .await
        .unwrap()
        .produtor_ids;
    assert_eq!(owners.len(), 1);
}

#[tokio::test]
async fn test_update_cultivo_excludes_itself() {
    let h = harness();
    let ana = produtor(&h, "52998224725").await;
    let fazenda = propriedade(&h, &[&ana], 500.0).await;
    let s = safra(&h, &fazenda, 2024).await;
    let soja = cultura(&h, "Soja").await;
    let c = h
        .services
        .cultivos
        .create(plant(&fazenda, &s, &soja, 400.0))
        .await
        .unwrap();

    let grown = h
        .services
        .cultivos
        .update(
            &c.id,
            UpdateCultivoCommand {
                area_plantada: Some(500.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(grown.area_plantada, 500.0);

    let err = h
        .services
        .cultivos
        .update(
            &c.id,
            UpdateCultivoCommand {
                area_plantada: Some(500.01),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::BusinessRuleViolation(_)));
}

#[tokio::test]
async fn test_cultivo_safra_of_other_propriedade() {
    let h = harness();
    let ana = produtor(&h, "52998224725").await;
    let a = propriedade(&h, &[&ana], 500.0).await;
    let b = propriedade(&h, &[&ana], 500.0).await;
    let s_b = safra(&h, &b, 2024).await;
    let soja = cultura(&h, "Soja").await;

    let err = h
        .services
        .cultivos
        .create(plant(&a, &s_b, &soja, 10.0))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::BusinessRuleViolation(_)));
}

#[tokio::test]
async fn test_cultivo_non_positive_area() {
    let h = harness();
    let ana = produtor(&h, "52998224725").await;
    let fazenda = propriedade(&h, &[&ana], 500.0).await;
    let s = safra(&h, &fazenda, 2024).await;
    let soja = cultura(&h, "Soja").await;

    let err = h
        .services
        .cultivos
        .create(plant(&fazenda, &s, &soja, 0.0))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::ValidationFailed(_)));
}

#[tokio::test]
async fn test_list_cultivos_filtered() {
    let h = harness();
    let ana = produtor(&h, "52998224725").await;
    let fazenda = propriedade(&h, &[&ana], 500.0).await;
    let s = safra(&h, &fazenda, 2024).await;
    let soja = cultura(&h, "Soja").await;
    let milho = cultura(&h, "Milho").await;
    h.services
        .cultivos
        .create(plant(&fazenda, &s, &soja, 10.0))
        .await
        .unwrap();
    h.services
        .cultivos
        .create(plant(&fazenda, &s, &milho, 10.0))
        .await
        .unwrap();

    let only_milho = h
        .services
        .cultivos
        .find_all(
            CultivoQuery {
                cultura_id: Some(milho.clone()),
                ..Default::default()
            },
            Page::default(),
        )
        .await
        .unwrap();
    assert_eq!(only_milho.total, 1);
    assert_eq!(only_milho.items[0].cultura_id, milho);
}

// ============================================================================
// Dashboard & Audit
// ============================================================================

#[tokio::test]
async fn test_dashboard_summary() {
    let h = harness();
    let ana = produtor(&h, "52998224725").await;
    let fazenda = propriedade(&h, &[&ana], 600.0).await;
    let s = safra(&h, &fazenda, 2024).await;
    let soja = cultura(&h, "Soja").await;
    let milho = cultura(&h, "Milho").await;
    h.services
        .cultivos
        .create(plant(&fazenda, &s, &soja, 300.0))
        .await
        .unwrap();
    h.services
        .cultivos
        .create(plant(&fazenda, &s, &milho, 100.0))
        .await
        .unwrap();

    let d = h.services.dashboard.summary().await.unwrap();
    assert_eq!(d.total_fazendas, 1);
    assert_eq!(d.total_hectares, 1000.0);
    assert_eq!(d.por_estado[0].estado, "MT");
    assert_eq!(d.por_estado[0].percentual, 100.0);
    assert_eq!(d.por_cultura[0].cultura, "Soja");
    assert_eq!(d.por_cultura[0].percentual, 75.0);
    assert_eq!(d.uso_do_solo.percentual_agricultavel, 75.0);
    assert_eq!(d.uso_do_solo.percentual_vegetacao, 25.0);
}

#[tokio::test]
async fn test_audit_service_filters() {
    let h = harness();
    let list = h
        .services
        .auditoria
        .list(AuditQuery {
            entity: Some("produtor".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(list.total, 0);

    let err = h
        .services
        .auditoria
        .list(AuditQuery {
            action: Some("explode".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::ValidationFailed(_)));
}
