use std::path::Path;

use super::render;
use crate::merge::GeneratedFile;

/// A template file: both `path` and `content` may hold `{{key}}` placeholders.
pub struct TemplateFile {
    pub path: &'static str,
    pub content: &'static str,
}

/// Render every file of a template group into `dest`.
pub fn render_group(
    group: &[TemplateFile],
    dest: &Path,
    vars: &[(&str, &str)],
) -> Vec<GeneratedFile> {
    group
        .iter()
        .map(|file| GeneratedFile {
            path: dest.join(render(file.path, vars)),
            content: render(file.content, vars),
        })
        .collect()
}

pub const STORE: &[TemplateFile] = &[TemplateFile {
    path: "{{dash}}.store.ts",
    content: r#"import { computed, inject } from '@angular/core';
import { patchState, signalStore, withComputed, withMethods, withState } from '@ngrx/signals';
import {
  addEntity,
  removeEntity,
  setAllEntities,
  updateEntity,
  withEntities,
} from '@ngrx/signals/entities';
import { firstValueFrom } from 'rxjs';

import { EntityId, initialRequestState } from '@shared-state/entity.model';
import { {{class}}, Create{{class}}Dto, Update{{class}}Dto } from '{{store_model_import}}';
import { {{class}}Service } from '{{store_service_import}}';

const selectId = (item: {{class}}): EntityId => item.{{pk}};

export const {{class}}Store = signalStore(
  { providedIn: 'root' },
  withEntities<{{class}}>(),
  withState(initialRequestState),
  withComputed(({ entities, status }) => ({
    {{plural_camel}}: computed(() => entities()),
    {{camel}}Count: computed(() => entities().length),
    loading: computed(() => status() === 'loading'),
  })),
  withMethods((store, service = inject({{class}}Service)) => ({
    async load{{plural_class}}(): Promise<void> {
      patchState(store, { status: 'loading', error: null });
      try {
        const {{plural_camel}} = await firstValueFrom(service.getAll());
        patchState(store, setAllEntities({{plural_camel}}, { selectId }), { status: 'success' });
      } catch (error) {
        patchState(store, { status: 'error', error: String(error) });
      }
    },

    async add{{class}}(dto: Create{{class}}Dto): Promise<void> {
      patchState(store, { status: 'loading', error: null });
      try {
        const {{camel}} = await firstValueFrom(service.create(dto));
        patchState(store, addEntity({{camel}}, { selectId }), { status: 'success' });
      } catch (error) {
        patchState(store, { status: 'error', error: String(error) });
      }
    },

    async update{{class}}(id: EntityId, changes: Update{{class}}Dto): Promise<void> {
      patchState(store, { status: 'loading', error: null });
      try {
        const {{camel}} = await firstValueFrom(service.update(id, changes));
        patchState(store, updateEntity({ id, changes: {{camel}} }, { selectId }), { status: 'success' });
      } catch (error) {
        patchState(store, { status: 'error', error: String(error) });
      }
    },

    async remove{{class}}(id: EntityId): Promise<void> {
      patchState(store, { status: 'loading', error: null });
      try {
        await firstValueFrom(service.delete(id));
        patchState(store, removeEntity(id), { status: 'success' });
      } catch (error) {
        patchState(store, { status: 'error', error: String(error) });
      }
    },
  })),
);
"#,
}];

pub const SERVICES: &[TemplateFile] = &[TemplateFile {
    path: "{{dash}}.service.ts",
    content: r#"import { HttpClient } from '@angular/common/http';
import { inject, Injectable } from '@angular/core';
import { Observable } from 'rxjs';

import { EntityId } from '@shared-state/entity.model';
import { {{class}}, Create{{class}}Dto, Update{{class}}Dto } from '{{service_model_import}}';

@Injectable({ providedIn: 'root' })
export class {{class}}Service {
  private readonly http = inject(HttpClient);
  private readonly baseUrl = '/api/{{plural_dash}}';

  getAll(): Observable<{{class}}[]> {
    return this.http.get<{{class}}[]>(this.baseUrl);
  }

  getById(id: EntityId): Observable<{{class}}> {
    return this.http.get<{{class}}>(`${this.baseUrl}/${id}`);
  }

  create(dto: Create{{class}}Dto): Observable<{{class}}> {
    return this.http.post<{{class}}>(this.baseUrl, dto);
  }

  update(id: EntityId, changes: Update{{class}}Dto): Observable<{{class}}> {
    return this.http.patch<{{class}}>(`${this.baseUrl}/${id}`, changes);
  }

  delete(id: EntityId): Observable<void> {
    return this.http.delete<void>(`${this.baseUrl}/${id}`);
  }
}
"#,
}];

pub const MODELS: &[TemplateFile] = &[TemplateFile {
    path: "{{dash}}.model.ts",
    content: r#"import { EntityId } from '@shared-state/entity.model';

export interface {{class}} {
  {{pk}}: EntityId;
}

export type Create{{class}}Dto = Omit<{{class}}, '{{pk}}'>;

export type Update{{class}}Dto = Partial<Create{{class}}Dto>;
"#,
}];

pub const ENTITY: &[TemplateFile] = &[
    TemplateFile {
        path: "entity.model.ts",
        content: r#"export type EntityId = string | number;

export type RequestStatus = 'idle' | 'loading' | 'success' | 'error';

export interface RequestState {
  status: RequestStatus;
  error: string | null;
}

export const initialRequestState: RequestState = {
  status: 'idle',
  error: null,
};
"#,
    },
    TemplateFile {
        path: "index.ts",
        content: "export * from './entity.model';\n",
    },
];
